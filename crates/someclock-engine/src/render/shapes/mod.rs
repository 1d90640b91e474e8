//! Shape renderers.
//!
//! Every renderer follows the same two-phase shape: `prepare` uploads the whole
//! frame's instances once, `draw` records a sub-range into an open render pass.
//! Splitting the phases lets `SceneRenderer` interleave shape kinds in paint
//! order without overwriting instance buffers mid-frame.

mod common;

pub mod circle;
pub mod line;
pub mod text;
