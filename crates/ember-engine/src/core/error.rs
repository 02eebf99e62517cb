use std::error::Error;
use std::fmt;

/// Fatal failure of a host run.
///
/// Every stage maps to exit code `-1`, except a host loop that reported its
/// own non-zero code.
#[derive(Debug)]
pub enum LifecycleError {
    /// `run()` was called on a host that already ran.
    AlreadyRun,
    WindowCreation(anyhow::Error),
    ContextCreation(anyhow::Error),
    SwapInterval(anyhow::Error),
    Initialize(anyhow::Error),
    /// The native loop returned a non-zero code.
    HostLoop(i32),
}

impl LifecycleError {
    pub fn code(&self) -> i32 {
        match self {
            LifecycleError::HostLoop(code) if *code != 0 => *code,
            _ => -1,
        }
    }

    /// Short name of the failed stage.
    pub fn stage(&self) -> &'static str {
        match self {
            LifecycleError::AlreadyRun => "run",
            LifecycleError::WindowCreation(_) => "window creation",
            LifecycleError::ContextCreation(_) => "context creation",
            LifecycleError::SwapInterval(_) => "swap interval",
            LifecycleError::Initialize(_) => "application initialize",
            LifecycleError::HostLoop(_) => "host loop",
        }
    }
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::AlreadyRun => f.write_str("host already ran; create a new instance per run"),
            LifecycleError::HostLoop(code) => write!(f, "host loop exited with code {code}"),
            LifecycleError::WindowCreation(e)
            | LifecycleError::ContextCreation(e)
            | LifecycleError::SwapInterval(e)
            | LifecycleError::Initialize(e) => write!(f, "{} failed: {e:#}", self.stage()),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LifecycleError::WindowCreation(e)
            | LifecycleError::ContextCreation(e)
            | LifecycleError::SwapInterval(e)
            | LifecycleError::Initialize(e) => Some(&**e),
            _ => None,
        }
    }
}

/// Process exit code for a run result: 0 on success.
pub fn exit_code(result: &Result<(), LifecycleError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}
