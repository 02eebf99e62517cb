//! Ember engine crate.
//!
//! Hosts small graphics samples: a window, a GPU context bound to it, and an
//! application driven through a fixed lifecycle by [`core::SampleHost`].

pub mod core;
pub mod device;
pub mod logging;
pub mod platform;
pub mod time;
pub mod window;
