use std::sync::Arc;

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use super::event::Event;

/// Whether a loop should keep iterating.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Anything that can hand out raw window and display handles.
pub trait NativeHandles: HasWindowHandle + HasDisplayHandle + Send + Sync {}

impl<T> NativeHandles for T where T: HasWindowHandle + HasDisplayHandle + Send + Sync {}

/// Shared native window used for surface creation.
pub type NativeWindow = Arc<dyn NativeHandles>;

/// Callbacks driven by a window system that owns its message loop.
///
/// `prepare` runs once before the first `iterate`; a non-zero return aborts the
/// loop and becomes `run_own_loop`'s result.
pub trait LoopDelegate {
    fn prepare(&mut self, window: &mut dyn OsWindow) -> i32;

    fn iterate(&mut self, window: &mut dyn OsWindow) -> LoopControl;
}

/// OS window and event source.
pub trait OsWindow {
    /// Creates the native window. Called once per run.
    fn initialize(&mut self, name: &str, width: u32, height: u32) -> Result<()>;

    fn set_visible(&mut self, visible: bool);

    /// True when the window system insists on running its own loop.
    fn has_own_loop(&self) -> bool {
        false
    }

    /// Runs the native loop, calling back into `delegate`. Returns the loop's
    /// result code.
    fn run_own_loop(&mut self, delegate: &mut dyn LoopDelegate) -> i32 {
        let _ = delegate;
        log::error!("this window system has no native loop");
        -1
    }

    /// Pumps pending native messages into the event queue.
    fn message_loop(&mut self);

    fn pop_event(&mut self) -> Option<Event>;

    fn push_event(&mut self, event: Event);

    fn destroy(&mut self);

    /// Handles for surface creation, once the window exists.
    fn native_handle(&self) -> Option<NativeWindow> {
        None
    }

    fn size(&self) -> (u32, u32);
}
