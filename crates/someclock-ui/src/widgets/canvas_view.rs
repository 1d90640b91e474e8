use someclock_engine::coords::{Rect, Vec2};

use crate::canvas::Canvas;
use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

type DrawFn = Box<dyn Fn(&mut dyn Canvas, Rect)>;

/// Hosts a drawing callback.
///
/// The callback receives the [`Canvas`] and the bounds allocated by the
/// parent. The view asks for all the space it is offered, so put it in a
/// [`Column`](super::flex::Column) with `expand` to give it what its siblings
/// leave over.
pub struct CanvasView {
    draw: DrawFn,
    min_size: Vec2,
}

impl CanvasView {
    pub fn new(draw: impl Fn(&mut dyn Canvas, Rect) + 'static) -> Self {
        Self { draw: Box::new(draw), min_size: Vec2::zero() }
    }

    /// Smallest size reported to layout.
    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_size = Vec2::new(width, height);
        self
    }
}

impl Widget for CanvasView {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        // Take every bounded axis in full; fall back to the minimum otherwise.
        let fill = |max: f32, min: f32| if max.is_finite() { max.max(min) } else { min };
        constraints.constrain(Vec2::new(
            fill(constraints.max.x, self.min_size.x),
            fill(constraints.max.y, self.min_size.y),
        ))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        (self.draw)(painter, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use someclock_engine::scene::{DrawCmd, DrawList};
    use someclock_engine::text::FontSystem;

    #[test]
    fn callback_receives_allocated_bounds() {
        let view = CanvasView::new(|canvas, rect| {
            canvas.fill_circle(rect.center(), rect.min_side() / 2.0);
        });

        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut painter = Painter::new(&mut list, &fonts);
            view.paint(&mut painter, Rect::new(10.0, 20.0, 100.0, 60.0));
        }

        let DrawCmd::Circle(circle) = &list.items()[0].cmd else {
            panic!("expected a circle");
        };
        assert_eq!(circle.center, Vec2::new(60.0, 50.0));
        assert_eq!(circle.radius, 30.0);
    }

    #[test]
    fn measure_fills_bounded_axes_only() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let view = CanvasView::new(|_, _| {}).min_size(120.0, 80.0);

        let c = Constraints::loose(Vec2::new(500.0, f32::INFINITY));
        assert_eq!(view.measure(c, &ctx), Vec2::new(500.0, 80.0));

        let c = Constraints::loose(Vec2::new(300.0, 200.0));
        assert_eq!(view.measure(c, &ctx), Vec2::new(300.0, 200.0));
    }
}
