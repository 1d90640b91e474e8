//! Scripted [`Host`] for unit tests: a real scheduler driven by a fake clock.

use std::time::{Duration, Instant};

use someclock_engine::time::Scheduler;
use someclock_ui::prelude::{Host, TimerId};

pub struct TestHost {
    scheduler: Scheduler,
    now: Instant,
    started: Vec<TimerId>,
    pub redraws: usize,
    pub stops: usize,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(),
            now: Instant::now(),
            started: Vec::new(),
            redraws: 0,
            stops: 0,
        }
    }

    /// Moves time forward and returns the timers that fired.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        self.scheduler.poll(self.now)
    }

    pub fn active_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn last_started(&self) -> Option<TimerId> {
        self.started.last().copied()
    }
}

impl Host for TestHost {
    fn start_timer(&mut self, interval: Duration) -> TimerId {
        let id = self.scheduler.start(interval, self.now);
        self.started.push(id);
        id
    }

    fn stop_timer(&mut self, id: TimerId) -> bool {
        let stopped = self.scheduler.stop(id);
        if stopped {
            self.stops += 1;
        }
        stopped
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
