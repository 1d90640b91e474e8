//! Once-a-second clock driver.

use std::time::Duration;

use chrono::NaiveDateTime;
use someclock_engine::time::WallClock;
use someclock_ui::prelude::{Host, TimerId};

use crate::format::{date_label, time_label};

/// How often the clock re-reads the wall clock.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Most recent wall-clock sample and the labels derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    pub time: NaiveDateTime,
    pub time_label: String,
    pub date_label: String,
}

impl ClockState {
    pub fn at(time: NaiveDateTime) -> Self {
        Self {
            time,
            time_label: time_label(&time),
            date_label: date_label(&time),
        }
    }
}

/// Samples a [`WallClock`] on a repeating timer and asks for a redraw after
/// every sample.
pub struct ClockController {
    source: Box<dyn WallClock>,
    state: ClockState,
    timer: Option<TimerId>,
}

impl ClockController {
    pub fn new(source: impl WallClock + 'static) -> Self {
        let state = ClockState::at(source.now());
        Self { source: Box::new(source), state, timer: None }
    }

    /// Takes a fresh sample, then starts the tick timer. Mounting twice keeps
    /// the first timer.
    pub fn mount(&mut self, host: &mut dyn Host) {
        if self.timer.is_some() {
            log::debug!("clock already mounted");
            return;
        }
        self.refresh(host);
        let id = host.start_timer(TICK_INTERVAL);
        self.timer = Some(id);
        log::info!("clock mounted at {} ({id:?})", self.state.time_label);
    }

    /// Handles a timer tick. Returns `false` for timers this controller does
    /// not own, which are left alone.
    pub fn on_timer(&mut self, id: TimerId, host: &mut dyn Host) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.refresh(host);
        true
    }

    /// Stops the tick timer. Safe to call more than once.
    pub fn unmount(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.timer.take() {
            host.stop_timer(id);
            log::info!("clock unmounted ({id:?})");
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    fn refresh(&mut self, host: &mut dyn Host) {
        self.state = ClockState::at(self.source.now());
        log::trace!("tick {} {}", self.state.date_label, self.state.time_label);
        host.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::{NaiveDate, TimeDelta};
    use someclock_engine::time::FixedClock;

    use super::*;
    use crate::test_host::TestHost;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(9, 7, 3).unwrap()
    }

    fn mounted() -> (Rc<FixedClock>, ClockController, TestHost) {
        let clock = Rc::new(FixedClock::new(start()));
        let mut ctrl = ClockController::new(clock.clone());
        let mut host = TestHost::new();
        ctrl.mount(&mut host);
        (clock, ctrl, host)
    }

    /// Advances both clocks by one tick and dispatches whatever fired.
    fn tick(clock: &FixedClock, ctrl: &mut ClockController, host: &mut TestHost) {
        clock.advance(TimeDelta::seconds(1));
        for id in host.advance(TICK_INTERVAL) {
            ctrl.on_timer(id, host);
        }
    }

    #[test]
    fn mount_samples_time_and_starts_one_timer() {
        let (_clock, ctrl, host) = mounted();
        assert!(ctrl.is_running());
        assert_eq!(host.active_timers(), 1);
        assert_eq!(host.redraws, 1);
        assert_eq!(ctrl.state().time_label, "09:07:03");
        assert_eq!(ctrl.state().date_label, "05.01.2024");
    }

    #[test]
    fn one_redraw_per_tick() {
        let (clock, mut ctrl, mut host) = mounted();
        for _ in 0..10 {
            tick(&clock, &mut ctrl, &mut host);
        }
        assert_eq!(host.redraws, 1 + 10);
        assert_eq!(ctrl.state().time_label, "09:07:13");
    }

    #[test]
    fn state_holds_most_recent_sample() {
        let (clock, mut ctrl, mut host) = mounted();
        clock.set(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap().and_hms_opt(23, 59, 58).unwrap());
        tick(&clock, &mut ctrl, &mut host);

        let state = ctrl.state();
        assert_eq!(state.time, clock.now());
        assert_eq!(state.time_label, "23:59:59");
        assert_eq!(state.date_label, "31.12.2025");
    }

    #[test]
    fn foreign_timers_are_ignored() {
        let (_clock, mut ctrl, mut host) = mounted();
        let other = host.start_timer(Duration::from_millis(250));
        let before = ctrl.state().clone();

        assert!(!ctrl.on_timer(other, &mut host));
        assert_eq!(host.redraws, 1);
        assert_eq!(ctrl.state(), &before);
    }

    #[test]
    fn unmount_stops_the_timer() {
        let (clock, mut ctrl, mut host) = mounted();
        tick(&clock, &mut ctrl, &mut host);
        let redraws = host.redraws;

        ctrl.unmount(&mut host);
        assert!(!ctrl.is_running());
        assert_eq!(host.active_timers(), 0);

        for _ in 0..3 {
            tick(&clock, &mut ctrl, &mut host);
        }
        assert_eq!(host.redraws, redraws);
        assert_eq!(ctrl.state().time_label, "09:07:04");
    }

    #[test]
    fn stale_tick_after_unmount_has_no_effect() {
        let (_clock, mut ctrl, mut host) = mounted();
        let id = host.last_started().unwrap();
        ctrl.unmount(&mut host);

        assert!(!ctrl.on_timer(id, &mut host));
        assert_eq!(host.redraws, 1);
    }

    #[test]
    fn unmount_is_idempotent() {
        let (_clock, mut ctrl, mut host) = mounted();
        ctrl.unmount(&mut host);
        ctrl.unmount(&mut host);
        assert_eq!(host.stops, 1);
    }

    #[test]
    fn double_mount_keeps_a_single_timer() {
        let (_clock, mut ctrl, mut host) = mounted();
        ctrl.mount(&mut host);
        assert_eq!(host.active_timers(), 1);
        assert_eq!(host.redraws, 1);
    }

    #[test]
    fn remount_after_unmount_restarts_ticking() {
        let (clock, mut ctrl, mut host) = mounted();
        ctrl.unmount(&mut host);
        ctrl.mount(&mut host);
        tick(&clock, &mut ctrl, &mut host);
        assert_eq!(host.active_timers(), 1);
        assert_eq!(host.redraws, 3);
    }
}
