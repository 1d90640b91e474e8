use someclock_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── Align ─────────────────────────────────────────────────────────────────

/// Cross-axis alignment inside a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children fill the full cross-axis extent (default).
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

// ── Column ────────────────────────────────────────────────────────────────

struct ColumnChild {
    element: Element,
    expand: bool,
}

/// Vertical flex container. Children are stacked top to bottom.
///
/// Children added with [`expand`](Column::expand) share whatever height the
/// others leave free; the rest take their natural height.
///
/// # Example
/// ```rust,ignore
/// Column::new()
///     .padding_all(16.0)
///     .spacing(8.0)
///     .cross_align(Align::Center)
///     .child(Text::new("12:00:00", font, 32.0, ink))
///     .expand(CanvasView::new(draw_face))
/// ```
pub struct Column {
    children: Vec<ColumnChild>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Column {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Stretch }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    /// Adds a child at its natural height.
    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(ColumnChild { element: child.into(), expand: false });
        self
    }

    /// Adds a child that grows to fill the remaining height.
    pub fn expand(mut self, child: impl Into<Element>) -> Self {
        self.children.push(ColumnChild { element: child.into(), expand: true });
        self
    }

    // ── layout helpers ────────────────────────────────────────────────────

    fn child_constraints(&self, inner_w: f32, max_h: f32) -> Constraints {
        match self.cross_align {
            Align::Stretch => {
                // Only force the width when it is actually bounded.
                let min_x = if inner_w.is_finite() { inner_w } else { 0.0 };
                Constraints { min: Vec2::new(min_x, 0.0), max: Vec2::new(inner_w, max_h) }
            }
            _ => Constraints::loose(Vec2::new(inner_w, max_h)),
        }
    }

    fn child_x(&self, inner_origin_x: f32, inner_w: f32, child_w: f32) -> f32 {
        match self.cross_align {
            Align::Stretch | Align::Start => inner_origin_x,
            Align::Center => inner_origin_x + (inner_w - child_w) * 0.5,
            Align::End => inner_origin_x + (inner_w - child_w),
        }
    }

    fn total_spacing(&self) -> f32 {
        self.spacing * self.children.len().saturating_sub(1) as f32
    }

    /// Child rects for a column occupying `rect`, in child order.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let natural_c = self.child_constraints(inner.size.x, f32::INFINITY);

        let natural: Vec<Option<Vec2>> = self
            .children
            .iter()
            .map(|c| (!c.expand).then(|| c.element.measure(natural_c, ctx)))
            .collect();

        let fixed_h: f32 = natural.iter().flatten().map(|s| s.y).sum::<f32>() + self.total_spacing();
        let expanders = natural.iter().filter(|s| s.is_none()).count();
        let share = if expanders > 0 {
            ((inner.size.y - fixed_h) / expanders as f32).max(0.0)
        } else {
            0.0
        };

        let mut y = inner.origin.y;
        let mut rects = Vec::with_capacity(self.children.len());
        for (child, natural) in self.children.iter().zip(natural) {
            let size = match natural {
                Some(s) => s,
                None => {
                    let w = match self.cross_align {
                        Align::Stretch => inner.size.x,
                        _ => child
                            .element
                            .measure(Constraints::loose(Vec2::new(inner.size.x, share)), ctx)
                            .x,
                    };
                    Vec2::new(w, share)
                }
            };
            let x = self.child_x(inner.origin.x, inner.size.x, size.x);
            rects.push(Rect::new(x, y, size.x, size.y));
            y += size.y + self.spacing;
        }
        rects
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let child_c = self.child_constraints(inner_w, f32::INFINITY);

        let mut total_h = self.padding.v() + self.total_spacing();
        let mut max_child_w: f32 = 0.0;
        let mut has_expander = false;

        for child in &self.children {
            let s = child.element.measure(child_c, ctx);
            has_expander |= child.expand;
            total_h += s.y;
            max_child_w = max_child_w.max(s.x);
        }

        let w = match self.cross_align {
            Align::Stretch if constraints.max.x.is_finite() => constraints.max.x,
            _ => max_child_w + self.padding.h(),
        };
        let h = if has_expander && constraints.max.y.is_finite() {
            constraints.max.y
        } else {
            total_h
        };

        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        let rects = self.layout(rect, &ctx);
        for (child, child_rect) in self.children.iter().zip(rects) {
            child.element.paint(painter, child_rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use someclock_engine::text::FontSystem;

    struct Block(Vec2);

    impl Widget for Block {
        fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            constraints.constrain(self.0)
        }

        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    fn block(w: f32, h: f32) -> Block {
        Block(Vec2::new(w, h))
    }

    #[test]
    fn expanding_child_takes_remaining_height() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new()
            .padding_all(10.0)
            .spacing(5.0)
            .cross_align(Align::Center)
            .child(block(80.0, 30.0))
            .child(block(60.0, 20.0))
            .expand(block(0.0, 0.0));

        let rects = col.layout(Rect::new(0.0, 0.0, 200.0, 300.0), &ctx);

        assert_eq!(rects[0], Rect::new(60.0, 10.0, 80.0, 30.0));
        assert_eq!(rects[1], Rect::new(70.0, 45.0, 60.0, 20.0));
        // 280 inner - 30 - 20 - 2 * 5 spacing = 220
        assert_eq!(rects[2].origin.y, 70.0);
        assert_eq!(rects[2].size.y, 220.0);
    }

    #[test]
    fn stretch_fills_cross_axis() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new().child(block(50.0, 10.0)).expand(block(0.0, 0.0));

        let rects = col.layout(Rect::new(0.0, 0.0, 120.0, 100.0), &ctx);
        assert_eq!(rects[0].size.x, 120.0);
        assert_eq!(rects[1], Rect::new(0.0, 10.0, 120.0, 90.0));
    }

    #[test]
    fn expander_never_gets_negative_height() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new().child(block(10.0, 500.0)).expand(block(0.0, 0.0));

        let rects = col.layout(Rect::new(0.0, 0.0, 100.0, 100.0), &ctx);
        assert_eq!(rects[1].size.y, 0.0);
    }

    #[test]
    fn measure_fills_bounded_height_when_expanding() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let c = Constraints::loose(Vec2::new(300.0, 400.0));

        let fixed = Column::new().child(block(10.0, 40.0)).child(block(10.0, 40.0)).spacing(4.0);
        assert_eq!(fixed.measure(c, &ctx), Vec2::new(300.0, 84.0));

        let growing = Column::new().child(block(10.0, 40.0)).expand(block(0.0, 0.0));
        assert_eq!(growing.measure(c, &ctx), Vec2::new(300.0, 400.0));
    }
}
