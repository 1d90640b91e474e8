use crate::time::TimerId;
use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Lifecycle: `on_start` once the window exists, any number of `on_timer` /
/// `on_frame` calls, then `on_exit` exactly once before the window is
/// destroyed. Timers still running after `on_exit` are dropped by the runtime.
pub trait App {
    /// Called once after the window and GPU are ready.
    fn on_start(&mut self, ctx: &mut RuntimeCtx<'_>) {
        let _ = ctx;
    }

    /// Called when a timer started through the runtime fires.
    fn on_timer(&mut self, id: TimerId, ctx: &mut RuntimeCtx<'_>) -> AppControl;

    /// Called once per presented frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before the window is torn down.
    fn on_exit(&mut self, ctx: &mut RuntimeCtx<'_>) {
        let _ = ctx;
    }
}
