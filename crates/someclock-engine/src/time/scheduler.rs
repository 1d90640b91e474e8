use std::time::{Duration, Instant};

/// Handle to a repeating timer registered with a [`Scheduler`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct TimerEntry {
    id: TimerId,
    interval: Duration,
    deadline: Instant,
}

/// Single-threaded registry of repeating timers.
///
/// The scheduler never reads the system clock itself; callers pass `now` so the
/// event loop and tests drive time explicitly.
///
/// A timer that is polled late fires once and is re-anchored to the first
/// deadline after `now`. Missed intervals are coalesced, never replayed.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<TimerEntry>,
    next_id: u64,
}

impl Scheduler {
    /// Smallest accepted interval; shorter requests are clamped to it.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a repeating timer whose first deadline is `now + interval`.
    pub fn start(&mut self, interval: Duration, now: Instant) -> TimerId {
        let interval = interval.max(Self::MIN_INTERVAL);
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.timers.push(TimerEntry { id, interval, deadline: now + interval });
        log::debug!("timer {id:?} started ({interval:?})");
        id
    }

    /// Cancels a timer. Returns `false` if `id` was not active.
    pub fn stop(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let removed = self.timers.len() != before;
        if removed {
            log::debug!("timer {id:?} stopped");
        }
        removed
    }

    #[inline]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline, used as the event loop's wake-up time.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Returns the timers due at `now` in deadline order and advances each of
    /// them to its next deadline strictly after `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<(Instant, TimerId)> = Vec::new();

        for timer in &mut self.timers {
            if timer.deadline > now {
                continue;
            }
            due.push((timer.deadline, timer.id));

            let behind = now.saturating_duration_since(timer.deadline);
            let periods = behind.as_nanos() / timer.interval.as_nanos() + 1;
            if periods > 1 {
                log::trace!("timer {:?} skipped {} interval(s)", timer.id, periods - 1);
            }
            let advance = timer.interval.as_nanos().saturating_mul(periods);
            timer.deadline += Duration::from_nanos(u64::try_from(advance).unwrap_or(u64::MAX));
        }

        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn nothing_fires_before_first_deadline() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(SEC, t0);
        assert!(s.poll(t0).is_empty());
        assert!(s.poll(t0 + Duration::from_millis(999)).is_empty());
    }

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let id = s.start(SEC, t0);

        for n in 1..=5u32 {
            assert_eq!(s.poll(t0 + SEC * n), vec![id]);
            assert!(s.poll(t0 + SEC * n).is_empty(), "re-polling the same instant must not refire");
        }
    }

    #[test]
    fn late_poll_coalesces_missed_intervals() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let id = s.start(SEC, t0);

        let late = t0 + Duration::from_millis(3_500);
        assert_eq!(s.poll(late), vec![id]);
        assert_eq!(s.next_deadline(), Some(t0 + SEC * 4));
    }

    #[test]
    fn stopped_timer_never_fires() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let id = s.start(SEC, t0);

        assert!(s.stop(id));
        assert!(!s.stop(id));
        assert!(!s.is_active(id));
        assert!(s.poll(t0 + SEC * 10).is_empty());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn due_timers_are_reported_in_deadline_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let slow = s.start(Duration::from_millis(300), t0);
        let fast = s.start(Duration::from_millis(100), t0);

        assert_eq!(s.poll(t0 + Duration::from_millis(300)), vec![fast, slow]);
    }

    #[test]
    fn next_deadline_tracks_earliest_timer() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(SEC, t0);
        s.start(Duration::from_millis(250), t0);
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(Duration::ZERO, t0);
        assert_eq!(s.next_deadline(), Some(t0 + Scheduler::MIN_INTERVAL));
    }

    #[test]
    fn ids_are_unique() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let a = s.start(SEC, t0);
        let b = s.start(SEC, t0);
        assert_ne!(a, b);
        assert_eq!(s.len(), 2);
    }
}
