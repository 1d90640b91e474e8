//! Time subsystem.
//!
//! Provides stable, testable timing utilities without coupling to the runtime:
//! - `Scheduler`: repeating timers polled by the event loop
//! - `WallClock`: source of local wall-clock time

mod scheduler;
mod wall_clock;

pub use scheduler::{Scheduler, TimerId};
pub use wall_clock::{FixedClock, SystemClock, WallClock};
