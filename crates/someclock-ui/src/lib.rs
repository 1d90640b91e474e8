//! SomeClock UI: a small widget tree on top of `someclock-engine`.
//!
//! Applications implement [`Component`](component::Component), describe their
//! view with widgets, and draw custom graphics through the
//! [`Canvas`](canvas::Canvas) capability:
//!
//! ```rust,ignore
//! use someclock_ui::prelude::*;
//!
//! struct Dot;
//!
//! impl Component for Dot {
//!     fn view(&self, _fonts: &FontMap) -> Element {
//!         Column::new()
//!             .expand(CanvasView::new(|canvas, rect| {
//!                 canvas.set_fill_color(Color::rgb_hex(0xEF4444));
//!                 canvas.fill_circle(rect.center(), 10.0);
//!             }))
//!             .into()
//!     }
//! }
//!
//! Application::new().title("Dot").run(Dot)?;
//! ```

pub mod app;
pub mod canvas;
pub mod component;
pub mod constraints;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything needed to build a component, import this in application code.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::canvas::{Canvas, Primitive, Recorder};
    pub use crate::component::{Component, FontMap};
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::painter::Painter;
    pub use crate::scene::UiScene;
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        canvas_view::CanvasView,
        flex::{Align, Column},
        text::Text,
    };

    // Engine primitives components need.
    pub use someclock_engine::coords::{Rect, Vec2};
    pub use someclock_engine::core::Host;
    pub use someclock_engine::paint::Color;
    pub use someclock_engine::scene::Stroke;
    pub use someclock_engine::text::FontId;
    pub use someclock_engine::time::TimerId;
}
