use anyhow::Result;
use winit::dpi::LogicalSize;

use someclock_engine::coords::Vec2;
use someclock_engine::core::{App as EngineApp, AppControl, FrameCtx};
use someclock_engine::device::GpuInit;
use someclock_engine::paint::Color;
use someclock_engine::render::SceneRenderer;
use someclock_engine::time::TimerId;
use someclock_engine::window::{Runtime, RuntimeConfig, RuntimeCtx};

use crate::component::{Component, FontMap};
use crate::scene::UiScene;

// ── Application ───────────────────────────────────────────────────────────

/// Top-level UI application builder.
///
/// Configure the window and fonts, then hand a root [`Component`] to
/// [`run`](Self::run), which blocks until the window closes.
///
/// ```rust,ignore
/// Application::new()
///     .title("SomeClock")
///     .font("body", font_bytes)
///     .run(ClockPage::new(SystemClock))?;
/// ```
pub struct Application {
    title:      String,
    width:      f64,
    height:     f64,
    fonts:      Vec<(String, Vec<u8>)>,
    background: Color,
}

impl Application {
    pub fn new() -> Self {
        let defaults = RuntimeConfig::default();
        Self {
            title:      defaults.title,
            width:      defaults.initial_size.width,
            height:     defaults.initial_size.height,
            fonts:      Vec::new(),
            background: Color::WHITE,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// Register a named font. Fonts that fail to load are logged and skipped.
    pub fn font(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((name.into(), data));
        self
    }

    /// Color the window is cleared to before painting.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Opens the window and drives `component` until the window closes.
    pub fn run<C: Component>(self, component: C) -> Result<()> {
        let config = RuntimeConfig {
            title:        self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let state = UiAppState::new(self, component);
        Runtime::run(config, GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Bridges a [`Component`] to the engine's `App` contract.
///
/// Engine specifics (renderers, `FrameCtx`) stay here; components only see a
/// `Host` and a `FontMap`.
struct UiAppState<C: Component> {
    component:  C,
    background: Color,
    ui_scene:   UiScene,
    fonts:      FontMap,
    renderer:   SceneRenderer,
}

impl<C: Component> UiAppState<C> {
    fn new(app: Application, component: C) -> Self {
        let mut ui_scene = UiScene::new();
        let mut fonts = FontMap::new();

        for (name, bytes) in &app.fonts {
            match ui_scene.load_font(bytes) {
                Ok(id) => fonts.insert(name.clone(), id),
                Err(e) => log::warn!("failed to load font '{name}': {e}"),
            }
        }
        if fonts.is_empty() {
            log::warn!("no fonts loaded; text will not be drawn");
        }

        Self {
            component,
            background: app.background,
            ui_scene,
            fonts,
            renderer: SceneRenderer::new(),
        }
    }
}

impl<C: Component> EngineApp for UiAppState<C> {
    fn on_start(&mut self, ctx: &mut RuntimeCtx<'_>) {
        self.component.mount(ctx);
    }

    fn on_timer(&mut self, id: TimerId, ctx: &mut RuntimeCtx<'_>) -> AppControl {
        self.component.on_timer(id, ctx);
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let root = self.component.view(&self.fonts);
        self.ui_scene.frame(&root, Vec2::new(w, h));

        let draw_list = &mut self.ui_scene.draw_list;
        let fonts     = &self.ui_scene.font_system;
        let renderer  = &mut self.renderer;

        ctx.render(self.background, |rctx, target| {
            renderer.render(rctx, target, draw_list, fonts);
        })
    }

    fn on_exit(&mut self, ctx: &mut RuntimeCtx<'_>) {
        self.component.unmount(ctx);
    }
}
