use std::collections::HashMap;

use someclock_engine::core::Host;
use someclock_engine::text::FontId;
use someclock_engine::time::TimerId;

use crate::widget::Element;

// ── FontMap ───────────────────────────────────────────────────────────────

/// Name-keyed map of loaded font handles.
///
/// Handed to [`Component::view`] so components can look fonts up by the name
/// they were registered under with `Application::font`.
#[derive(Debug, Default, Clone)]
pub struct FontMap {
    fonts: HashMap<String, FontId>,
    default: Option<FontId>,
}

impl FontMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` under `name`. The first registered font becomes the default.
    pub fn insert(&mut self, name: impl Into<String>, id: FontId) {
        self.fonts.insert(name.into(), id);
        self.default.get_or_insert(id);
    }

    /// Returns the font registered under `name`, or `None` if the name is
    /// unknown or its font failed to load.
    pub fn get(&self, name: &str) -> Option<FontId> {
        self.fonts.get(name).copied()
    }

    /// First font that loaded successfully.
    pub fn default_font(&self) -> Option<FontId> {
        self.default
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

// ── Component ─────────────────────────────────────────────────────────────

/// A view with a lifecycle, driven by [`Application`](crate::app::Application).
///
/// `mount` runs once the window is up, `unmount` once before it is destroyed.
/// Anything a component starts through the [`Host`] in `mount` should be
/// stopped in `unmount`.
pub trait Component: 'static {
    fn mount(&mut self, host: &mut dyn Host) {
        let _ = host;
    }

    /// A timer started by this component fired.
    fn on_timer(&mut self, id: TimerId, host: &mut dyn Host) {
        let _ = (id, host);
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        let _ = host;
    }

    /// Builds the widget tree for the next frame.
    fn view(&self, fonts: &FontMap) -> Element;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_has_no_default() {
        let fonts = FontMap::new();
        assert!(fonts.is_empty());
        assert_eq!(fonts.default_font(), None);
        assert_eq!(fonts.get("body"), None);
    }
}
