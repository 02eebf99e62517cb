use anyhow::Result;

use super::ctx::FrameCtx;

/// Application contract implemented by samples.
///
/// Every hook has a no-op default, so a sample only overrides what it needs.
pub trait Application {
    /// Called once, after the context exists and before the first `step`.
    ///
    /// An error aborts the run.
    fn initialize(&mut self, ctx: &mut FrameCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Advances the simulation. Events the sample wants to react to should be
    /// popped here; whatever is left is drained by the host afterwards.
    fn step(&mut self, ctx: &mut FrameCtx<'_>, dt: f32, total_time: f64) {
        let _ = (ctx, dt, total_time);
    }

    /// Records the frame. Presentation happens right after.
    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        let _ = ctx;
    }

    /// Called once during teardown, only if `initialize` succeeded.
    fn destroy(&mut self) {}
}
