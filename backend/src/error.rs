use thiserror::Error;

/// Failures while bringing up the window, the GL context or the tick timer.
///
/// None of these are recoverable without outside intervention, callers are
/// expected to report them and exit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendInitError {
    #[error("SDL initialization failed: {0}")]
    Sdl(String),

    #[error("SDL video subsystem unavailable: {0}")]
    Video(String),

    #[error("SDL event subsystem unavailable: {0}")]
    Events(String),

    #[error("cannot set SDL hint {0}")]
    Hint(&'static str),

    #[error("error while building OpenGL window: {0}")]
    Window(String),

    #[error("cannot create OpenGL context: {0}")]
    GlContext(String),

    #[error("OpenGL function loader failed: {0}")]
    GlLoader(String),

    #[error("OpenGL error 0x{0:04X}")]
    Gl(u32),

    #[error("cannot arm frame timer: {0}")]
    Timer(String),
}

/// Failures of a running `RenderLoop`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderLoopError {
    /// Waiting on the event queue failed. Treated as fatal: the loop stops.
    #[error("waiting for events failed: {0}")]
    EventWait(String),

    /// `run` was called on a loop that already reached `Stopped`.
    #[error("render loop already stopped")]
    Stopped,
}
