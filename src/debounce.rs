//! Debounce timer with generation tokens
//!
//! Every reschedule replaces the pending deadline and bumps the generation, so
//! a reply tagged with an older generation can be recognized as stale and
//! dropped.

use std::time::{Duration, Instant};

/// Default quiet period before a prediction refresh fires
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(600);

/// Token identifying one scheduled refresh
pub type Generation = u64;

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    /// Pending refresh, if any
    deadline: Option<Instant>,
    generation: Generation,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
            generation: 0,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Cancel any pending refresh and schedule a new one
    pub fn schedule(&mut self, now: Instant) -> Generation {
        self.generation += 1;
        self.deadline = Some(now + self.quiet_period);
        self.generation
    }

    /// Fire the pending refresh once its deadline has passed
    ///
    /// Returns the generation the refresh belongs to. Fires at most once per
    /// schedule.
    pub fn poll(&mut self, now: Instant) -> Option<Generation> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.generation)
            }
            _ => None,
        }
    }

    /// Whether a reply for `generation` may still update state
    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation
    }

    /// Drop the pending refresh and invalidate anything in flight
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.generation += 1;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(600));
        let token = d.schedule(t0);

        assert_eq!(d.poll(t0 + ms(599)), None);
        assert_eq!(d.poll(t0 + ms(600)), Some(token));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_fires_only_once() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(100));
        d.schedule(t0);

        assert!(d.poll(t0 + ms(100)).is_some());
        assert!(d.poll(t0 + ms(500)).is_none());
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(600));
        let first = d.schedule(t0);
        let second = d.schedule(t0 + ms(300));

        assert_ne!(first, second);
        // The first deadline has passed but was replaced
        assert_eq!(d.poll(t0 + ms(650)), None);
        assert_eq!(d.poll(t0 + ms(900)), Some(second));
        assert!(!d.is_current(first));
        assert!(d.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_in_flight() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(10));
        let token = d.schedule(t0);
        assert_eq!(d.poll(t0 + ms(10)), Some(token));

        d.cancel();
        assert!(!d.is_current(token));
        assert!(d.poll(t0 + ms(1000)).is_none());
    }

    #[test]
    fn test_default_quiet_period() {
        assert_eq!(Debouncer::default().quiet_period(), ms(600));
    }
}
