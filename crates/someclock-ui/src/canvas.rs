use someclock_engine::coords::Vec2;
use someclock_engine::paint::Color;
use someclock_engine::scene::Stroke;

/// Immediate-mode 2D drawing capability handed to drawing callbacks.
///
/// Colors and stroke width are sticky state, as on most 2D canvases: set them
/// once, then issue any number of shape calls.
pub trait Canvas {
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: f32);

    /// Solid disc in the current fill color.
    fn fill_circle(&mut self, center: Vec2, radius: f32);

    /// Ring in the current stroke color and width, centered on the circumference.
    fn stroke_circle(&mut self, center: Vec2, radius: f32);

    /// Segment in the current stroke color and width.
    fn draw_line(&mut self, from: Vec2, to: Vec2);
}

/// Sticky paint state shared by canvas backends.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasState {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self { fill: Color::BLACK, stroke: Color::BLACK, stroke_width: 1.0 }
    }
}

impl CanvasState {
    #[inline]
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width, self.stroke)
    }
}

// ── Recorder ──────────────────────────────────────────────────────────────

/// One recorded canvas call with the state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, stroke: Stroke },
    Line { from: Vec2, to: Vec2, stroke: Stroke },
}

/// Canvas that records primitives instead of drawing them.
#[derive(Debug, Default)]
pub struct Recorder {
    state: CanvasState,
    primitives: Vec<Primitive>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }

    /// Recorded line segments, in call order.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Stroke)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line { from, to, stroke } => Some((*from, *to, *stroke)),
            _ => None,
        })
    }
}

impl Canvas for Recorder {
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
        self.primitives.push(Primitive::FillCircle { center, radius, color: self.state.fill });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.primitives.push(Primitive::StrokeCircle { center, radius, stroke: self.state.stroke() });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        self.primitives.push(Primitive::Line { from, to, stroke: self.state.stroke() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_sticks_until_changed() {
        let red = Color::rgb_hex(0xEF4444);
        let mut rec = Recorder::new();
        rec.set_stroke_color(red);
        rec.set_stroke_width(3.0);
        rec.draw_line(Vec2::zero(), Vec2::new(1.0, 0.0));
        rec.draw_line(Vec2::zero(), Vec2::new(0.0, 1.0));
        rec.set_stroke_width(1.0);
        rec.stroke_circle(Vec2::zero(), 5.0);

        let widths: Vec<f32> = rec.lines().map(|(_, _, s)| s.width).collect();
        assert_eq!(widths, vec![3.0, 3.0]);
        assert_eq!(
            rec.primitives()[2],
            Primitive::StrokeCircle { center: Vec2::zero(), radius: 5.0, stroke: Stroke::new(1.0, red) }
        );
    }

    #[test]
    fn fill_uses_fill_color_not_stroke() {
        let mut rec = Recorder::new();
        rec.set_fill_color(Color::WHITE);
        rec.set_stroke_color(Color::BLACK);
        rec.fill_circle(Vec2::new(2.0, 2.0), 1.0);
        assert_eq!(
            rec.into_primitives(),
            vec![Primitive::FillCircle { center: Vec2::new(2.0, 2.0), radius: 1.0, color: Color::WHITE }]
        );
    }
}
