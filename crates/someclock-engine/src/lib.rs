//! SomeClock engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by higher layers:
//! the winit loop, the timer scheduler, the draw stream and its renderers.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
