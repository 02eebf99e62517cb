/// Outcome of presenting a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentStatus {
    Presented,
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error or nothing to present; frame dropped.
    Skipped,
    /// Unrecoverable (commonly OOM); the loop should stop.
    Fatal,
}

impl PresentStatus {
    pub fn is_fatal(self) -> bool {
        self == PresentStatus::Fatal
    }
}
