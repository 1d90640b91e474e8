use someclock_engine::coords::{Rect, Vec2};
use someclock_engine::paint::Color;
use someclock_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// A single line of text.
///
/// # Example
/// ```rust,ignore
/// Text::new("12:00:00", font, 32.0, Color::rgb_hex(0x111827))
/// ```
pub struct Text {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(ctx.fonts.measure_text(&self.text, self.font, self.size))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.text(&self.text, self.font, self.size, self.color, rect.origin);
    }
}
