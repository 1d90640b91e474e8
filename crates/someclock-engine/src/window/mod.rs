//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! wakes the loop for timer deadlines.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
