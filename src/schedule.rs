//! Poll cadence for hosts without a periodic task scheduler

use core::time::Duration;

/// Decides when the next poll is due
///
/// The caller feeds a monotonic timestamp (time since boot, for instance);
/// nothing here sleeps or reads a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval: Duration,
    last: Option<Duration>,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Cadence {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True on the first call and whenever at least one interval has passed
    /// since the last due tick. A due tick is consumed.
    pub fn is_due(&mut self, now: Duration) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        };
        if due {
            self.last = Some(now);
        }
        due
    }

    /// Time left until the next tick, zero when already due
    pub fn remaining(&self, now: Duration) -> Duration {
        match self.last {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.saturating_sub(last)),
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::Cadence;
    use core::time::Duration;

    #[test]
    fn due_once_per_interval() {
        let mut cadence = Cadence::new(Duration::from_secs(60));
        let at = Duration::from_secs;

        assert!(cadence.is_due(at(5)));
        assert!(!cadence.is_due(at(5)));
        assert!(!cadence.is_due(at(64)));
        assert_eq!(cadence.remaining(at(64)), at(1));
        assert!(cadence.is_due(at(65)));
        assert!(!cadence.is_due(at(100)));
        assert!(cadence.is_due(at(200)));
    }

    #[test]
    fn reset_makes_next_tick_due() {
        let mut cadence = Cadence::new(Duration::from_secs(60));
        assert!(cadence.is_due(Duration::from_secs(1)));
        cadence.reset();
        assert_eq!(cadence.remaining(Duration::from_secs(2)), Duration::ZERO);
        assert!(cadence.is_due(Duration::from_secs(2)));
    }

    #[test]
    fn clock_going_backwards_is_not_due() {
        let mut cadence = Cadence::new(Duration::from_secs(10));
        assert!(cadence.is_due(Duration::from_secs(30)));
        assert!(!cadence.is_due(Duration::from_secs(20)));
    }
}
