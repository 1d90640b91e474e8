use someclock_engine::time::WallClock;
use someclock_ui::prelude::*;

use crate::controller::ClockController;
use crate::face::draw_clock_face;

const INK: Color = Color::rgb_hex(0x111827);
const MUTED: Color = Color::rgb_hex(0x6B7280);

const TIME_SIZE: f32 = 40.0;
const DATE_SIZE: f32 = 18.0;

/// The clock screen: digital time, date, and the analog face below them.
pub struct ClockPage {
    controller: ClockController,
}

impl ClockPage {
    pub fn new(source: impl WallClock + 'static) -> Self {
        Self { controller: ClockController::new(source) }
    }

    pub fn controller(&self) -> &ClockController {
        &self.controller
    }
}

impl Component for ClockPage {
    fn mount(&mut self, host: &mut dyn Host) {
        self.controller.mount(host);
    }

    fn on_timer(&mut self, id: TimerId, host: &mut dyn Host) {
        self.controller.on_timer(id, host);
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        self.controller.unmount(host);
    }

    fn view(&self, fonts: &FontMap) -> Element {
        let state = self.controller.state();
        let mut column = Column::new()
            .padding_all(16.0)
            .spacing(6.0)
            .cross_align(Align::Center);

        if let Some(font) = fonts.get("body").or(fonts.default_font()) {
            column = column
                .child(Text::new(state.time_label.clone(), font, TIME_SIZE, INK))
                .child(Text::new(state.date_label.clone(), font, DATE_SIZE, MUTED));
        }

        let time = state.time;
        column
            .expand(
                CanvasView::new(move |canvas, bounds| draw_clock_face(canvas, &time, bounds))
                    .min_size(120.0, 120.0),
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use someclock_engine::scene::DrawCmd;
    use someclock_engine::time::FixedClock;

    use super::*;
    use crate::controller::TICK_INTERVAL;
    use crate::test_host::TestHost;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn view_without_fonts_paints_only_the_face() {
        let page = ClockPage::new(FixedClock::new(noon()));
        let mut scene = UiScene::new();
        let list = scene.frame(&page.view(&FontMap::new()), Vec2::new(360.0, 440.0));

        assert_eq!(list.len(), 66);
        assert!(list.items().iter().all(|item| !matches!(item.cmd, DrawCmd::Text(_))));
    }

    #[test]
    fn face_fills_the_page_below_padding() {
        let page = ClockPage::new(FixedClock::new(noon()));
        let mut scene = UiScene::new();
        let list = scene.frame(&page.view(&FontMap::new()), Vec2::new(300.0, 300.0));

        let DrawCmd::Circle(face) = &list.items()[0].cmd else {
            panic!("face should be painted first");
        };
        // 300 - 2 * 16 padding = 268 square, radius 134 - 12.
        assert_eq!(face.center, Vec2::new(150.0, 150.0));
        assert_eq!(face.radius, 122.0);
    }

    #[test]
    fn lifecycle_is_forwarded_to_the_controller() {
        let clock = Rc::new(FixedClock::new(noon()));
        let mut page = ClockPage::new(clock.clone());
        let mut host = TestHost::new();

        page.mount(&mut host);
        clock.advance(TimeDelta::seconds(1));
        for id in host.advance(TICK_INTERVAL) {
            page.on_timer(id, &mut host);
        }
        assert_eq!(page.controller().state().time_label, "12:00:01");
        assert_eq!(host.redraws, 2);

        page.unmount(&mut host);
        assert_eq!(host.active_timers(), 0);
    }
}
