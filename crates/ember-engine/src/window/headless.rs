use std::collections::VecDeque;

use anyhow::{ensure, Result};

use super::event::Event;
use super::os_window::{LoopControl, LoopDelegate, OsWindow};

/// In-memory window.
///
/// Events are queued with `push_event` (or scripted per pump with
/// `script_pump`). Useful for the null backend and for driving the host loop
/// without a display server.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    name: String,
    width: u32,
    height: u32,
    visible: bool,
    initialized: bool,
    own_loop: bool,
    events: VecDeque<Event>,
    scripted: VecDeque<Vec<Event>>,
    pumps: u64,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the window report a native loop and drive the delegate itself.
    pub fn with_own_loop(mut self) -> Self {
        self.own_loop = true;
        self
    }

    /// Queues a batch of events to be delivered by a future `message_loop`
    /// call, one batch per pump.
    pub fn script_pump(&mut self, events: Vec<Event>) {
        self.scripted.push_back(events);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn pump_count(&self) -> u64 {
        self.pumps
    }
}

impl OsWindow for HeadlessWindow {
    fn initialize(&mut self, name: &str, width: u32, height: u32) -> Result<()> {
        ensure!(width > 0 && height > 0, "window has zero size ({width}x{height})");
        self.name = name.to_owned();
        self.width = width;
        self.height = height;
        self.initialized = true;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn has_own_loop(&self) -> bool {
        self.own_loop
    }

    fn run_own_loop(&mut self, delegate: &mut dyn LoopDelegate) -> i32 {
        let code = delegate.prepare(self);
        if code != 0 {
            return code;
        }

        while delegate.iterate(self) == LoopControl::Continue {}
        0
    }

    fn message_loop(&mut self) {
        self.pumps += 1;
        if let Some(batch) = self.scripted.pop_front() {
            self.events.extend(batch);
        }
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    fn destroy(&mut self) {
        self.initialized = false;
        self.visible = false;
        self.events.clear();
        self.scripted.clear();
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountDown(u32);

    impl LoopDelegate for CountDown {
        fn prepare(&mut self, window: &mut dyn OsWindow) -> i32 {
            window.set_visible(true);
            0
        }

        fn iterate(&mut self, window: &mut dyn OsWindow) -> LoopControl {
            window.message_loop();
            self.0 -= 1;
            if self.0 == 0 { LoopControl::Exit } else { LoopControl::Continue }
        }
    }

    struct FailPrepare;

    impl LoopDelegate for FailPrepare {
        fn prepare(&mut self, _: &mut dyn OsWindow) -> i32 {
            -1
        }

        fn iterate(&mut self, _: &mut dyn OsWindow) -> LoopControl {
            panic!("iterate after failed prepare");
        }
    }

    #[test]
    fn rejects_zero_size() {
        let mut w = HeadlessWindow::new();
        assert!(w.initialize("x", 0, 10).is_err());
        assert!(!w.is_initialized());
    }

    #[test]
    fn events_are_fifo() {
        let mut w = HeadlessWindow::new();
        w.push_event(Event::LostFocus);
        w.push_event(Event::Closed);
        assert_eq!(w.pop_event(), Some(Event::LostFocus));
        assert_eq!(w.pop_event(), Some(Event::Closed));
        assert_eq!(w.pop_event(), None);
    }

    #[test]
    fn scripted_batches_arrive_one_per_pump() {
        let mut w = HeadlessWindow::new();
        w.script_pump(vec![Event::GainedFocus]);
        w.script_pump(vec![Event::Closed]);
        assert_eq!(w.pop_event(), None);
        w.message_loop();
        assert_eq!(w.pop_event(), Some(Event::GainedFocus));
        assert_eq!(w.pop_event(), None);
        w.message_loop();
        assert_eq!(w.pop_event(), Some(Event::Closed));
        assert_eq!(w.pump_count(), 2);
    }

    #[test]
    fn own_loop_runs_until_exit() {
        let mut w = HeadlessWindow::new().with_own_loop();
        assert!(w.has_own_loop());
        let mut d = CountDown(3);
        assert_eq!(w.run_own_loop(&mut d), 0);
        assert!(w.is_visible());
        assert_eq!(w.pump_count(), 3);
    }

    #[test]
    fn own_loop_returns_prepare_failure() {
        let mut w = HeadlessWindow::new().with_own_loop();
        assert_eq!(w.run_own_loop(&mut FailPrepare), -1);
    }

    #[test]
    fn destroy_drops_pending_events() {
        let mut w = HeadlessWindow::new();
        w.initialize("x", 4, 4).unwrap();
        w.push_event(Event::Closed);
        w.destroy();
        assert!(!w.is_initialized());
        assert_eq!(w.pop_event(), None);
    }
}
