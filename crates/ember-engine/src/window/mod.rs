//! Window abstraction and event source.
//!
//! The host loop talks to windows through [`OsWindow`] only. Two
//! implementations ship with the crate: [`WinitWindow`] for desktop platforms
//! and [`HeadlessWindow`], an in-memory queue for null runs and tests.

mod event;
mod headless;
mod os_window;
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod winit;

pub use event::{Event, Key, KeyEvent, Modifiers, MouseButton, MouseButtonEvent, MouseWheelDelta};
pub use headless::HeadlessWindow;
pub use os_window::{LoopControl, LoopDelegate, NativeHandles, NativeWindow, OsWindow};
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use self::winit::WinitWindow;

/// Default window for the current platform.
pub fn create_window() -> Box<dyn OsWindow> {
    #[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
    {
        Box::new(WinitWindow::new())
    }
    #[cfg(any(target_arch = "wasm32", target_os = "ios"))]
    {
        Box::new(HeadlessWindow::new().with_own_loop())
    }
}
