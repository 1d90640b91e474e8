//! Font loading and text measurement.
//!
//! Glyph rasterization lives in `render::shapes::text`; this module only owns
//! the parsed fonts so layout and rendering agree on metrics.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
