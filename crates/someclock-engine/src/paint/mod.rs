//! Paint model shared between UI and renderers.
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
