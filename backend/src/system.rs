use sdl2::video::GLProfile;

use crate::error::BackendInitError;
use crate::glutils::{check_gl_err, clear_color_depth, log_opengl_info};
use crate::ticker::TickSource;

const RENDER_SCALE_QUALITY_HINT: &str = "SDL_RENDER_SCALE_QUALITY";

/// SDL window with a current OpenGL 3.3 core context.
///
/// Every handle the frame loop needs lives here and is passed around
/// explicitly; dropping the `System` (or calling [`System::shutdown`])
/// releases the context, the window and SDL itself, in that order.
pub struct System {
    _gl_ctx: sdl2::video::GLContext,
    window: sdl2::video::Window,
    timer_subsystem: sdl2::TimerSubsystem,
    event_subsystem: sdl2::EventSubsystem,
    _video_subsystem: sdl2::VideoSubsystem,
    sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(title: &str, w: usize, h: usize) -> Result<System, BackendInitError> {
        let sdl_context = sdl2::init().map_err(BackendInitError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(BackendInitError::Video)?;
        let event_subsystem = sdl_context.event().map_err(BackendInitError::Events)?;
        let timer_subsystem = sdl_context.timer().map_err(BackendInitError::Timer)?;

        if !sdl2::hint::set(RENDER_SCALE_QUALITY_HINT, "1") {
            return Err(BackendInitError::Hint(RENDER_SCALE_QUALITY_HINT));
        }

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(title, w as u32, h as u32)
            .opengl()
            .build()
            .map_err(|e| BackendInitError::Window(e.to_string()))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(BackendInitError::GlContext)?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        if !gl::Viewport::is_loaded() || !gl::Clear::is_loaded() {
            return Err(BackendInitError::GlLoader(
                "core entry points missing".to_string(),
            ));
        }

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 3));

        unsafe {
            gl::Viewport(0, 0, w as i32, h as i32);
            gl::Enable(gl::DEPTH_TEST);
        }
        check_gl_err()?;
        log_opengl_info();

        log::info!("opened {w}x{h} window \"{title}\"");

        Ok(System {
            _gl_ctx: gl_ctx,
            window,
            timer_subsystem,
            event_subsystem,
            _video_subsystem: video_subsystem,
            sdl_context,
        })
    }

    pub fn event_pump(&self) -> Result<sdl2::EventPump, BackendInitError> {
        self.sdl_context
            .event_pump()
            .map_err(BackendInitError::Events)
    }

    /// Starts frame ticks on this window's event queue.
    pub fn tick_source(&self, period_ms: u32) -> Result<TickSource<'_>, BackendInitError> {
        TickSource::register(&self.event_subsystem, &self.timer_subsystem, period_ms)
    }

    /// Swaps the drawn backbuffer to the screen.
    pub fn present(&self) {
        self.window.gl_swap_window();
    }

    pub fn clear_screen(&self, r: f32, g: f32, b: f32) {
        clear_color_depth(r, g, b);
    }

    pub fn shutdown(self) {
        log::debug!("closing window \"{}\"", self.window.title());
        drop(self);
        log::info!("graphics shut down");
    }
}
