//! Time subsystem.
//!
//! Provides a monotonic stopwatch and the frame clock derived from it.
//! Intended usage:
//! - `FrameClock::start()` once when the loop becomes live
//! - `sample()` at the top of each iteration, `commit()` once the frame is presented

mod frame_clock;
mod timer;

pub use frame_clock::{FrameClock, FrameTime};
pub use timer::Timer;
