//! Platform selection.
//!
//! Everything decided before a window or GPU context exists: which renderer
//! backend to ask for, which device type, which client API version, and where
//! the graphics entry-point library lives.

mod args;
mod library;
mod params;

pub use args::{device_type_from_arg, display_type_from_arg, platform_from_args, USE_ANGLE_ARG};
pub use library::{EntryPointLibrary, SearchType, EGL_LIBRARY_ENV};
pub use params::{DeviceType, PlatformParams, Renderer};
