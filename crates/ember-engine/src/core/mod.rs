//! Core engine-facing contracts and the host loop.
//!
//! [`SampleHost`] owns the window, the graphics context and the application,
//! and drives them through preparation, the per-frame iteration and teardown.
//! Applications implement [`Application`] and see the world through
//! [`FrameCtx`].

mod app;
mod ctx;
mod error;
mod host;
mod state;

#[cfg(test)]
mod testing;

pub use app::Application;
pub use ctx::FrameCtx;
pub use error::{exit_code, LifecycleError};
pub use host::{HostConfig, SampleHost};
pub use state::LifecycleState;
pub use crate::window::LoopControl;
