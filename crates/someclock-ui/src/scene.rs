use someclock_engine::coords::{Rect, Vec2};
use someclock_engine::scene::DrawList;
use someclock_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Element;

/// Owns the resources that outlive a single frame.
///
/// `font_system` and `draw_list` are public so the caller can split-borrow
/// both when handing them to the engine's `SceneRenderer`.
pub struct UiScene {
    pub font_system: FontSystem,
    /// Draw list populated by the most recent [`frame`](Self::frame) call.
    pub draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self { font_system: FontSystem::new(), draw_list: DrawList::new() }
    }

    /// Load a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Lays out and paints `root` over the whole viewport.
    ///
    /// The returned list is valid until the next call.
    pub fn frame(&mut self, root: &Element, viewport: Vec2) -> &mut DrawList {
        self.draw_list.clear();

        let ctx = LayoutCtx { fonts: &self.font_system };
        // The root always covers the viewport; measuring just lets containers
        // settle their natural sizes.
        let _ = root.measure(Constraints::tight(viewport), &ctx);
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);

        {
            let mut painter = Painter::new(&mut self.draw_list, &self.font_system);
            root.paint(&mut painter, rect);
        }

        &mut self.draw_list
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::canvas_view::CanvasView;
    use crate::widgets::flex::Column;
    use someclock_engine::scene::DrawCmd;

    #[test]
    fn frame_replaces_previous_draw_list() {
        let mut scene = UiScene::new();
        let root: Element = Column::new()
            .expand(CanvasView::new(|canvas, rect| canvas.fill_circle(rect.center(), 4.0)))
            .into();

        assert_eq!(scene.frame(&root, Vec2::new(100.0, 50.0)).len(), 1);
        let list = scene.frame(&root, Vec2::new(100.0, 50.0));
        assert_eq!(list.len(), 1);

        let DrawCmd::Circle(c) = &list.items()[0].cmd else {
            panic!("expected a circle");
        };
        assert_eq!(c.center, Vec2::new(50.0, 25.0));
    }

    #[test]
    fn loading_invalid_font_reports_error() {
        let mut scene = UiScene::new();
        assert!(scene.load_font(&[]).is_err());
    }
}
