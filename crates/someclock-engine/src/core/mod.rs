//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform loop)
//! and higher layers (UI, application). It avoids leaking runtime internals
//! into user code and provides a consistent per-frame context.

mod app;
mod ctx;
mod host;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use host::Host;
