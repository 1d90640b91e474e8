use std::time::Duration;

use crate::time::TimerId;

/// Services the runtime offers to application code.
///
/// Implemented by `window::RuntimeCtx`; tests implement it over a bare
/// `time::Scheduler`.
pub trait Host {
    /// Starts a repeating timer. The first tick is one `interval` from now.
    fn start_timer(&mut self, interval: Duration) -> TimerId;

    /// Cancels a timer. Returns `false` if it was not running.
    fn stop_timer(&mut self, id: TimerId) -> bool;

    /// Asks for the window to be repainted. Requests made within the same
    /// callback coalesce into a single redraw.
    fn request_redraw(&mut self);
}
