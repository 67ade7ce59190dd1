use std::cell::Cell;

use jiff::{SignedDuration, Timestamp};

/// Source of "now" for the store's timestamps.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that only moves when told to. Used by tests to pin timestamps.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    /// Moves the clock forward; saturates at the maximum timestamp.
    pub fn advance(&self, by: SignedDuration) {
        let next = self.now.get().checked_add(by).unwrap_or(Timestamp::MAX);
        self.now.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(Timestamp::UNIX_EPOCH);
        assert_eq!(clock.now(), Timestamp::UNIX_EPOCH);

        clock.advance(SignedDuration::from_secs(90));
        assert_eq!(clock.now().as_second(), 90);

        clock.set(Timestamp::UNIX_EPOCH);
        assert_eq!(clock.now(), Timestamp::UNIX_EPOCH);
    }

    #[test]
    fn test_system_clock_is_recent() {
        let before = Timestamp::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
