use crate::error::RenderLoopError;

/// What the frame loop cares about in an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Quit,
    Tick,
    /// Anything else (input, resize, ...). Ignored by the loop.
    Other,
}

/// Blocking source of classified events.
pub trait EventSource {
    /// Sleeps until the next event arrives.
    fn wait_event(&mut self) -> Result<LoopEvent, String>;

    /// Returns an already queued event without blocking.
    fn poll_event(&mut self) -> Option<LoopEvent>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// How ticks that piled up behind a slow frame are handled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TickPolicy {
    /// Every queued tick draws one frame, late frames are caught up one by one.
    #[default]
    Backlog,
    /// Ticks already pending when a tick is handled are dropped; one frame is drawn.
    Coalesce,
}

/// Tick-driven draw/present loop.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    policy: TickPolicy,
    frames: u64,
    skipped: u64,
}

impl RenderLoop {
    pub fn new(policy: TickPolicy) -> Self {
        RenderLoop {
            state: LoopState::Running,
            policy,
            frames: 0,
            skipped: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Ticks dropped by `TickPolicy::Coalesce`.
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped
    }

    /// Runs until a quit event, returning the number of frames drawn.
    ///
    /// For each tick `draw_frame` is called and then `present`. A failing
    /// wait stops the loop for good and is returned as
    /// `RenderLoopError::EventWait`.
    pub fn run<S, D, P>(
        &mut self,
        source: &mut S,
        mut draw_frame: D,
        mut present: P,
    ) -> Result<u64, RenderLoopError>
    where
        S: EventSource + ?Sized,
        D: FnMut(),
        P: FnMut(),
    {
        if self.state == LoopState::Stopped {
            return Err(RenderLoopError::Stopped);
        }

        loop {
            let event = match source.wait_event() {
                Ok(ev) => ev,
                Err(e) => {
                    log::error!("event wait failed: {e}");
                    self.state = LoopState::Stopped;
                    return Err(RenderLoopError::EventWait(e));
                }
            };

            match event {
                LoopEvent::Quit => {
                    self.stop();
                    return Ok(self.frames);
                }
                LoopEvent::Tick => {
                    if self.policy == TickPolicy::Coalesce && self.drain_pending_ticks(source) {
                        self.stop();
                        return Ok(self.frames);
                    }
                    draw_frame();
                    present();
                    self.frames += 1;
                }
                LoopEvent::Other => {}
            }
        }
    }

    // Returns true when a quit was found among the pending events.
    fn drain_pending_ticks<S>(&mut self, source: &mut S) -> bool
    where
        S: EventSource + ?Sized,
    {
        while let Some(event) = source.poll_event() {
            match event {
                LoopEvent::Quit => return true,
                LoopEvent::Tick => self.skipped += 1,
                LoopEvent::Other => {}
            }
        }
        false
    }

    fn stop(&mut self) {
        self.state = LoopState::Stopped;
        log::debug!(
            "render loop stopped after {} frames ({} ticks coalesced)",
            self.frames,
            self.skipped
        );
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(TickPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Receiver};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::thread;
    use std::time::{Duration, Instant};

    use LoopEvent::{Other, Quit, Tick};

    /// Events grouped by wake-up: `wait_event` opens the next group,
    /// `poll_event` only sees what is left of the current one.
    struct ScriptedSource {
        groups: VecDeque<VecDeque<LoopEvent>>,
        current: VecDeque<LoopEvent>,
    }

    impl ScriptedSource {
        fn new(groups: &[&[LoopEvent]]) -> Self {
            ScriptedSource {
                groups: groups.iter().map(|g| g.iter().copied().collect()).collect(),
                current: VecDeque::new(),
            }
        }

        fn flat(events: &[LoopEvent]) -> Self {
            let groups: Vec<&[LoopEvent]> = events.chunks(1).collect();
            Self::new(&groups)
        }

        fn remaining(&self) -> usize {
            self.current.len() + self.groups.iter().map(|g| g.len()).sum::<usize>()
        }
    }

    impl EventSource for ScriptedSource {
        fn wait_event(&mut self) -> Result<LoopEvent, String> {
            loop {
                if let Some(ev) = self.current.pop_front() {
                    return Ok(ev);
                }
                match self.groups.pop_front() {
                    Some(group) => self.current = group,
                    None => return Err("event queue closed".to_string()),
                }
            }
        }

        fn poll_event(&mut self) -> Option<LoopEvent> {
            self.current.pop_front()
        }
    }

    struct ChannelSource {
        rx: Receiver<LoopEvent>,
    }

    impl EventSource for ChannelSource {
        fn wait_event(&mut self) -> Result<LoopEvent, String> {
            self.rx.recv().map_err(|e| e.to_string())
        }

        fn poll_event(&mut self) -> Option<LoopEvent> {
            self.rx.try_recv().ok()
        }
    }

    #[test]
    fn each_tick_draws_then_presents() {
        let calls = RefCell::new(Vec::new());
        let mut source = ScriptedSource::flat(&[Tick, Tick, Quit]);
        let mut render_loop = RenderLoop::default();

        let frames = render_loop
            .run(
                &mut source,
                || calls.borrow_mut().push("draw"),
                || calls.borrow_mut().push("present"),
            )
            .unwrap();

        assert_eq!(frames, 2);
        assert_eq!(
            calls.into_inner(),
            vec!["draw", "present", "draw", "present"]
        );
        assert_eq!(render_loop.state(), LoopState::Stopped);
    }

    #[test]
    fn other_events_are_ignored() {
        let mut draws = 0;
        let mut source = ScriptedSource::flat(&[Other, Tick, Other, Other, Quit]);
        let mut render_loop = RenderLoop::default();

        render_loop.run(&mut source, || draws += 1, || {}).unwrap();

        assert_eq!(draws, 1);
    }

    #[test]
    fn quit_with_pending_ticks_stops_immediately() {
        let mut draws = 0;
        let mut source = ScriptedSource::flat(&[Tick, Quit, Tick, Tick]);
        let mut render_loop = RenderLoop::default();

        render_loop.run(&mut source, || draws += 1, || {}).unwrap();

        assert_eq!(draws, 1);
        assert_eq!(source.remaining(), 2);
        assert_eq!(render_loop.state(), LoopState::Stopped);
    }

    #[test]
    fn backlog_draws_every_queued_tick() {
        let mut draws = 0;
        let mut source = ScriptedSource::new(&[&[Tick, Tick, Tick], &[Tick], &[Quit]]);
        let mut render_loop = RenderLoop::new(TickPolicy::Backlog);

        render_loop.run(&mut source, || draws += 1, || {}).unwrap();

        assert_eq!(draws, 4);
        assert_eq!(render_loop.skipped_ticks(), 0);
    }

    #[test]
    fn coalesce_draws_once_per_wake() {
        let mut draws = 0;
        let mut source = ScriptedSource::new(&[&[Tick, Tick, Other, Tick], &[Tick], &[Quit]]);
        let mut render_loop = RenderLoop::new(TickPolicy::Coalesce);

        render_loop.run(&mut source, || draws += 1, || {}).unwrap();

        assert_eq!(draws, 2);
        assert_eq!(render_loop.skipped_ticks(), 2);
    }

    #[test]
    fn coalesce_honors_quit_found_while_draining() {
        let mut draws = 0;
        let mut source = ScriptedSource::new(&[&[Tick, Tick, Quit, Tick]]);
        let mut render_loop = RenderLoop::new(TickPolicy::Coalesce);

        render_loop.run(&mut source, || draws += 1, || {}).unwrap();

        assert_eq!(draws, 0);
        assert_eq!(render_loop.state(), LoopState::Stopped);
    }

    #[test]
    fn failed_wait_is_fatal() {
        let mut source = ScriptedSource::flat(&[Tick]);
        let mut render_loop = RenderLoop::default();

        let err = render_loop.run(&mut source, || {}, || {}).unwrap_err();

        assert_eq!(
            err,
            RenderLoopError::EventWait("event queue closed".to_string())
        );
        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert_eq!(render_loop.frames(), 1);
    }

    #[test]
    fn stopped_loop_does_not_restart() {
        let mut source = ScriptedSource::flat(&[Quit, Tick, Quit]);
        let mut render_loop = RenderLoop::default();
        render_loop.run(&mut source, || {}, || {}).unwrap();

        let err = render_loop.run(&mut source, || {}, || {}).unwrap_err();

        assert_eq!(err, RenderLoopError::Stopped);
        assert_eq!(source.remaining(), 2);
    }

    #[test]
    fn fast_frames_follow_tick_rate() {
        const PERIOD: Duration = Duration::from_millis(10);
        const TICKS: u64 = 30;

        let (tx, rx) = unbounded();
        let producer = thread::spawn(move || {
            for _ in 0..TICKS {
                thread::sleep(PERIOD);
                tx.send(Tick).unwrap();
            }
            tx.send(Quit).unwrap();
        });

        let start = Instant::now();
        let mut source = ChannelSource { rx };
        let mut render_loop = RenderLoop::default();
        let presents = RefCell::new(0u64);
        let frames = render_loop
            .run(&mut source, || {}, || *presents.borrow_mut() += 1)
            .unwrap();
        let elapsed = start.elapsed();
        producer.join().unwrap();

        assert_eq!(frames, TICKS);
        assert_eq!(presents.into_inner(), TICKS);

        let per_second = frames as f64 / elapsed.as_secs_f64();
        let expected = 1000.0 / PERIOD.as_millis() as f64;
        assert!(per_second <= expected * 1.1, "rate {per_second:.1}/s");
        assert!(per_second >= expected / 4.0, "rate {per_second:.1}/s");
    }

    #[test]
    fn slow_frames_accumulate_ticks() {
        const TICKS: u64 = 10;

        let (tx, rx) = unbounded();
        let observer = rx.clone();
        let producer = thread::spawn(move || {
            for _ in 0..TICKS {
                tx.send(Tick).unwrap();
                thread::sleep(Duration::from_millis(1));
            }
            tx.send(Quit).unwrap();
        });

        let mut source = ChannelSource { rx };
        let mut render_loop = RenderLoop::new(TickPolicy::Backlog);
        let mut max_queued = 0;
        let frames = render_loop
            .run(
                &mut source,
                || {
                    thread::sleep(Duration::from_millis(5));
                    max_queued = max_queued.max(observer.len());
                },
                || {},
            )
            .unwrap();
        producer.join().unwrap();

        assert_eq!(frames, TICKS);
        assert!(max_queued >= 2, "queue never grew: {max_queued}");
    }
}
