use std::fmt;

/// Where a host is in its single run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleState {
    /// Constructed; `run()` not called yet.
    Uninitialized,
    /// Window exists; context and application are being brought up.
    Preparing,
    /// Frame loop is live.
    Running,
    /// Loop finished or a stage failed. Terminal.
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Preparing => "preparing",
            LifecycleState::Running => "running",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}
