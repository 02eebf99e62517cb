use super::timer::Timer;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous committed frame.
    pub dt: f32,

    /// Seconds since the clock was started.
    pub total: f64,

    /// Number of frames committed before this one.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Unlike a plain tick counter, sampling and committing are separate: an
/// iteration that is abandoned before presenting (because the loop was asked
/// to stop) never moves the baseline forward.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    timer: Timer,
    previous: f64,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the underlying timer and zeroes the baseline.
    pub fn start(&mut self) {
        self.timer.start();
        self.previous = 0.0;
        self.frame_index = 0;
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    /// Elapsed time of the last committed frame.
    pub fn previous_elapsed(&self) -> f64 {
        self.previous
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Reads the timer and returns the frame that would end now.
    pub fn sample(&self) -> FrameTime {
        self.frame_at(self.timer.elapsed_secs())
    }

    /// Builds the frame ending at `elapsed` seconds.
    ///
    /// `dt` never goes negative, even if `elapsed` is behind the baseline.
    pub fn frame_at(&self, elapsed: f64) -> FrameTime {
        let dt = (elapsed - self.previous).max(0.0);
        FrameTime {
            dt: dt as f32,
            total: elapsed,
            frame_index: self.frame_index,
        }
    }

    /// Marks `frame` as presented; its end time becomes the new baseline.
    pub fn commit(&mut self, frame: FrameTime) {
        self.previous = self.previous.max(frame.total);
        self.frame_index = self.frame_index.wrapping_add(1);
    }
}
