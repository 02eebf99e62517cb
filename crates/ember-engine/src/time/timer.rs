use std::time::Instant;

/// Monotonic stopwatch.
///
/// Reads zero until started. After `stop()` the elapsed time is frozen at the
/// stop instant until the timer is started again.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    started: Option<Instant>,
    stopped: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the stopwatch from zero.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
        self.stopped = None;
    }

    pub fn stop(&mut self) {
        if self.started.is_some() && self.stopped.is_none() {
            self.stopped = Some(Instant::now());
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some() && self.stopped.is_none()
    }

    /// Seconds since `start()`.
    pub fn elapsed_secs(&self) -> f64 {
        let Some(started) = self.started else {
            return 0.0;
        };

        let end = self.stopped.unwrap_or_else(Instant::now);
        end.saturating_duration_since(started).as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn unstarted_timer_reads_zero() {
        let t = Timer::new();
        assert_eq!(t.elapsed_secs(), 0.0);
        assert!(!t.is_running());
    }

    #[test]
    fn elapsed_is_monotonic_while_running() {
        let mut t = Timer::new();
        t.start();
        let a = t.elapsed_secs();
        thread::sleep(Duration::from_millis(2));
        let b = t.elapsed_secs();
        assert!(b >= a);
        assert!(b > 0.0);
    }

    #[test]
    fn stop_freezes_elapsed() {
        let mut t = Timer::new();
        t.start();
        thread::sleep(Duration::from_millis(1));
        t.stop();
        let a = t.elapsed_secs();
        thread::sleep(Duration::from_millis(2));
        assert_eq!(t.elapsed_secs(), a);
        assert!(!t.is_running());
    }

    #[test]
    fn restart_resets_baseline() {
        let mut t = Timer::new();
        t.start();
        thread::sleep(Duration::from_millis(5));
        t.stop();
        let before = t.elapsed_secs();
        t.start();
        assert!(t.elapsed_secs() < before);
    }
}
