use someclock_engine::coords::Vec2;
use someclock_engine::paint::Color;
use someclock_engine::scene::{DrawList, ZIndex};
use someclock_engine::text::{FontId, FontSystem};

use crate::canvas::{Canvas, CanvasState};
use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Records into the engine's `DrawList`. Every call takes the next z value, so
/// later calls paint over earlier ones regardless of shape kind.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    pub(crate) font_system: &'a FontSystem,
    z: i32,
    state: CanvasState,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(draw_list: &'a mut DrawList, font_system: &'a FontSystem) -> Self {
        Self { draw_list, font_system, z: 0, state: CanvasState::default() }
    }

    /// Returns a [`LayoutCtx`] borrowing this painter's font system.
    ///
    /// Containers use it inside `paint` to re-measure children.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.font_system }
    }

    /// Single line of text with its top-left corner at `origin`.
    pub fn text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin);
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

impl Canvas for Painter<'_> {
    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.state.stroke_width = width;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        let z = self.next_z();
        self.draw_list.push_solid_circle(z, center, radius, self.state.fill);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        let z = self.next_z();
        self.draw_list.push_circle_outline(z, center, radius, self.state.stroke());
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        let z = self.next_z();
        self.draw_list.push_line(z, from, to, self.state.stroke());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use someclock_engine::scene::DrawCmd;

    #[test]
    fn canvas_calls_land_in_paint_order() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts);
            p.set_fill_color(Color::WHITE);
            p.fill_circle(Vec2::new(10.0, 10.0), 8.0);
            p.set_stroke_width(2.0);
            p.draw_line(Vec2::new(10.0, 10.0), Vec2::new(10.0, 2.0));
            p.fill_circle(Vec2::new(10.0, 10.0), 1.0);
        }

        let kinds: Vec<&str> = list
            .iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Circle(_) => "circle",
                DrawCmd::Line(_) => "line",
                DrawCmd::Text(_) => "text",
            })
            .collect();
        assert_eq!(kinds, vec!["circle", "line", "circle"]);
    }

    #[test]
    fn stroke_state_is_applied_to_lines() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts);
            p.set_stroke_color(Color::rgb_hex(0x9CA3AF));
            p.set_stroke_width(2.0);
            p.draw_line(Vec2::zero(), Vec2::new(0.0, 5.0));
        }
        let DrawCmd::Line(line) = &list.items()[0].cmd else {
            panic!("expected a line");
        };
        assert_eq!(line.stroke.width, 2.0);
        assert_eq!(line.stroke.color, Color::rgb_hex(0x9CA3AF));
    }
}
