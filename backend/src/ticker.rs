use sdl2::event::Event;
use sdl2::timer::Timer;
use std::mem::MaybeUninit;
use std::ptr;

use crate::error::BackendInitError;
use crate::render_loop::{EventSource, LoopEvent};
use crate::system::System;

/// SDL user event type reserved for frame ticks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TickTag(u32);

impl TickTag {
    pub(crate) fn from_raw(event_type: u32) -> Self {
        TickTag(event_type)
    }

    pub fn event_type(&self) -> u32 {
        self.0
    }

    pub fn matches(&self, event: &Event) -> bool {
        matches!(event, Event::User { type_, .. } if *type_ == self.0)
    }

    fn event(&self) -> Event {
        Event::User {
            timestamp: 0,
            window_id: 0,
            type_: self.0,
            code: 0,
            data1: ptr::null_mut(),
            data2: ptr::null_mut(),
        }
    }
}

/// Periodic timer pushing one tick event per period onto the SDL queue.
///
/// The callback runs on SDL's timer thread and does nothing but push the
/// payload-free tick. Dropping the source removes the timer.
pub struct TickSource<'a> {
    tag: TickTag,
    _timer: Timer<'a, 'static>,
}

impl<'a> TickSource<'a> {
    /// Reserves a tick event type on `events` and arms a timer on `timers`.
    pub fn register(
        events: &sdl2::EventSubsystem,
        timers: &'a sdl2::TimerSubsystem,
        period_ms: u32,
    ) -> Result<TickSource<'a>, BackendInitError> {
        if period_ms == 0 {
            return Err(BackendInitError::Timer(
                "tick period must be non-zero".to_string(),
            ));
        }

        let raw_type = unsafe { events.register_event() }.map_err(BackendInitError::Events)?;
        let tag = TickTag::from_raw(raw_type);

        let sender = events.event_sender();
        let timer = timers.add_timer(
            period_ms,
            Box::new(move || {
                if let Err(e) = sender.push_event(tag.event()) {
                    log::warn!("dropped frame tick: {e}");
                }
                period_ms
            }),
        );

        log::debug!(
            "frame tick registered: event type {}, every {period_ms} ms",
            tag.event_type()
        );

        Ok(TickSource { tag, _timer: timer })
    }

    pub fn tag(&self) -> TickTag {
        self.tag
    }
}

pub(crate) fn classify(tag: TickTag, event: &Event) -> LoopEvent {
    match event {
        Event::Quit { .. } => LoopEvent::Quit,
        e if tag.matches(e) => LoopEvent::Tick,
        _ => LoopEvent::Other,
    }
}

/// `EventSource` over the SDL event queue.
pub struct SdlEventSource {
    pump: sdl2::EventPump,
    tag: TickTag,
}

impl SdlEventSource {
    pub fn new(system: &System, tag: TickTag) -> Result<SdlEventSource, BackendInitError> {
        Ok(Self::from_pump(system.event_pump()?, tag))
    }

    pub fn from_pump(pump: sdl2::EventPump, tag: TickTag) -> SdlEventSource {
        SdlEventSource { pump, tag }
    }
}

impl EventSource for SdlEventSource {
    fn wait_event(&mut self) -> Result<LoopEvent, String> {
        // EventPump::wait_event panics on failure, go through SDL_WaitEvent
        // so the error reaches the loop.
        let mut raw = MaybeUninit::<sdl2::sys::SDL_Event>::uninit();
        if unsafe { sdl2::sys::SDL_WaitEvent(raw.as_mut_ptr()) } != 1 {
            return Err(sdl2::get_error());
        }
        let event = Event::from_ll(unsafe { raw.assume_init() });
        Ok(classify(self.tag, &event))
    }

    fn poll_event(&mut self) -> Option<LoopEvent> {
        self.pump.poll_event().map(|e| classify(self.tag, &e))
    }
}
