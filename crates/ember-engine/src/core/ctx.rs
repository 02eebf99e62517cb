use crate::device::{ContextHandles, GraphicsContext, Handle};
use crate::time::FrameTime;
use crate::window::{Event, OsWindow};

/// Per-call context passed to `core::Application` hooks.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
pub struct FrameCtx<'a> {
    window: &'a mut dyn OsWindow,
    graphics: &'a mut dyn GraphicsContext,
    running: &'a mut bool,
    pub time: FrameTime,
}

impl<'a> FrameCtx<'a> {
    pub(crate) fn new(
        window: &'a mut dyn OsWindow,
        graphics: &'a mut dyn GraphicsContext,
        running: &'a mut bool,
        time: FrameTime,
    ) -> Self {
        Self {
            window,
            graphics,
            running,
            time,
        }
    }

    /// Takes the next pending event. A `Closed` event popped here is
    /// considered handled and no longer stops the loop on its own.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.window.pop_event()
    }

    /// Stops the loop. The current frame is not drawn.
    pub fn exit(&mut self) {
        if *self.running {
            log::debug!("exit requested by application");
        }
        *self.running = false;
    }

    pub fn is_running(&self) -> bool {
        *self.running
    }

    pub fn window(&mut self) -> &mut dyn OsWindow {
        &mut *self.window
    }

    pub fn graphics(&mut self) -> &mut dyn GraphicsContext {
        &mut *self.graphics
    }

    /// Window size in physical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        self.window.size()
    }

    pub fn handles(&self) -> ContextHandles {
        self.graphics.handles()
    }

    pub fn config(&self) -> Handle {
        self.handles().config
    }

    pub fn display(&self) -> Handle {
        self.handles().display
    }

    pub fn surface(&self) -> Handle {
        self.handles().surface
    }

    pub fn context(&self) -> Handle {
        self.handles().context
    }
}
