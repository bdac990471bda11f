//! Keystroke debouncer for the search input
//!
//! Collapses a rapid stream of pushed values into a single settled value
//! after a quiet period. Only the most recent value is ever emitted, and it
//! is emitted exactly once. The debouncer is poll-based: the owning event
//! loop calls [`Debouncer::take_settled`] on every tick, so no timer thread
//! exists and cancellation is just dropping the pending value.

use std::time::{Duration, Instant};

/// Quiet period before a pushed value settles.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Poll-based single-value debouncer.
#[derive(Debug)]
pub struct Debouncer<T> {
    /// Quiet period after the last push
    quiet_period: Duration,
    /// Latest pushed value, if any
    pending: Option<T>,
    /// Time of the last push
    last_push: Option<Instant>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the default quiet period (500ms)
    pub fn new() -> Self {
        Self::with_quiet_period(DEFAULT_QUIET_PERIOD)
    }

    /// Create a debouncer with a custom quiet period
    pub fn with_quiet_period(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            last_push: None,
        }
    }

    /// Record the latest value and re-arm the quiet-period deadline.
    /// An earlier pending value is replaced, never emitted.
    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
        self.last_push = Some(Instant::now());
    }

    /// Take the settled value once the quiet period has elapsed since the
    /// last push. Returns `None` while input is still hot or nothing is
    /// pending. A returned value is never returned again.
    pub fn take_settled(&mut self) -> Option<T> {
        let last = self.last_push?;
        if last.elapsed() >= self.quiet_period {
            self.last_push = None;
            self.pending.take()
        } else {
            None
        }
    }

    /// Emit the pending value immediately, ignoring the quiet period
    pub fn flush(&mut self) -> Option<T> {
        self.last_push = None;
        self.pending.take()
    }

    /// Drop the pending value without emitting it
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_push = None;
    }

    /// Check if a value is waiting for its quiet period to elapse
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time remaining until the pending value settles (None if idle)
    pub fn time_until_settled(&self) -> Option<Duration> {
        self.last_push.map(|last| {
            let elapsed = last.elapsed();
            if elapsed >= self.quiet_period {
                Duration::ZERO
            } else {
                self.quiet_period - elapsed
            }
        })
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const QUIET: Duration = Duration::from_millis(50);

    #[test]
    fn test_single_push_settles_after_quiet_period() {
        let mut debouncer = Debouncer::with_quiet_period(QUIET);
        debouncer.push("pasta");

        assert!(debouncer.is_pending());
        assert!(debouncer.take_settled().is_none());

        sleep(Duration::from_millis(60));
        assert_eq!(debouncer.take_settled(), Some("pasta"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_settled_value_is_emitted_exactly_once() {
        let mut debouncer = Debouncer::with_quiet_period(QUIET);
        debouncer.push(7);

        sleep(Duration::from_millis(60));
        assert_eq!(debouncer.take_settled(), Some(7));
        assert_eq!(debouncer.take_settled(), None);
    }

    #[test]
    fn test_rapid_pushes_keep_only_the_last_value() {
        let mut debouncer = Debouncer::with_quiet_period(QUIET);
        debouncer.push("p");
        debouncer.push("pa");
        debouncer.push("pas");

        sleep(Duration::from_millis(60));
        assert_eq!(debouncer.take_settled(), Some("pas"));
        assert_eq!(debouncer.take_settled(), None);
    }

    #[test]
    fn test_push_rearms_the_deadline() {
        let mut debouncer = Debouncer::with_quiet_period(QUIET);
        debouncer.push("a");

        // Push again just before the quiet period elapses; the first
        // deadline must not fire.
        sleep(Duration::from_millis(30));
        debouncer.push("b");
        sleep(Duration::from_millis(30));
        assert_eq!(debouncer.take_settled(), None);

        sleep(Duration::from_millis(30));
        assert_eq!(debouncer.take_settled(), Some("b"));
    }

    #[test]
    fn test_cancel_prevents_late_emission() {
        let mut debouncer = Debouncer::with_quiet_period(QUIET);
        debouncer.push("pasta");
        debouncer.cancel();

        sleep(Duration::from_millis(60));
        assert_eq!(debouncer.take_settled(), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_flush_emits_immediately() {
        let mut debouncer = Debouncer::with_quiet_period(QUIET);
        debouncer.push("pasta");

        assert_eq!(debouncer.flush(), Some("pasta"));
        assert_eq!(debouncer.flush(), None);

        // Nothing left to settle later either
        sleep(Duration::from_millis(60));
        assert_eq!(debouncer.take_settled(), None);
    }

    #[test]
    fn test_time_until_settled() {
        let mut debouncer = Debouncer::with_quiet_period(QUIET);
        assert!(debouncer.time_until_settled().is_none());

        debouncer.push("a");
        let remaining = debouncer.time_until_settled().unwrap();
        assert!(remaining <= QUIET);

        sleep(Duration::from_millis(60));
        assert_eq!(debouncer.time_until_settled(), Some(Duration::ZERO));
    }
}
