use std::time::{Duration, Instant};

/// Event poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Countdown step
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Get the event poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// One-second schedule for the countdown, driven by the poll loop.
///
/// At most one schedule is live: starting an active ticker keeps its phase.
#[derive(Debug, Default)]
pub struct Ticker {
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + COUNTDOWN_STEP);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Number of whole steps elapsed since the last call
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += COUNTDOWN_STEP;
        }
        self.next_due = Some(due);
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_inactive_ticker_never_fires() {
        let mut ticker = Ticker::new();
        assert!(!ticker.is_active());
        assert_eq!(ticker.due_ticks(Instant::now() + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_due_ticks_counts_whole_seconds() {
        let start = Instant::now();
        let mut ticker = Ticker::new();
        ticker.start(start);

        assert_eq!(ticker.due_ticks(start + Duration::from_millis(999)), 0);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(1000)), 1);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(4200)), 3);
    }

    #[test]
    fn test_restart_keeps_single_schedule() {
        let start = Instant::now();
        let mut ticker = Ticker::new();
        ticker.start(start);
        ticker.start(start + Duration::from_millis(700));
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(1000)), 1);

        ticker.cancel();
        assert!(!ticker.is_active());
        assert_eq!(ticker.due_ticks(start + Duration::from_secs(5)), 0);
    }
}
