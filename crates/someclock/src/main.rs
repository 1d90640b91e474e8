mod controller;
mod face;
mod format;
mod page;

#[cfg(test)]
mod test_host;

use anyhow::Context;
use someclock_engine::logging::{init_logging, LoggingConfig};
use someclock_engine::paint::Color;
use someclock_engine::time::SystemClock;
use someclock_ui::Application;

use crate::page::ClockPage;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let mut app = Application::new()
        .title("SomeClock")
        .size(360.0, 440.0)
        .background(Color::rgb_hex(0xF3F4F6));

    match load_font() {
        Some(bytes) => app = app.font("body", bytes),
        None => log::warn!("no system font found; the digital labels will be hidden"),
    }

    app.run(ClockPage::new(SystemClock)).context("clock window failed")
}

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\segoeui.ttf",
    ]
    .iter()
    .find_map(|p| {
        let bytes = std::fs::read(p).ok()?;
        log::debug!("using font {p}");
        Some(bytes)
    })
}
