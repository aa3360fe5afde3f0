use std::time::{Duration, SystemTime};

/// Source of the current time used to stamp session starts.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock frozen at a given instant, movable by hand
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: SystemTime,
}

impl FixedClock {
    pub fn new(now: SystemTime) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.now
    }
}

/// Milliseconds from `start` to `end`, zero when the clock went backwards.
pub fn elapsed_ms(start: SystemTime, end: SystemTime) -> u128 {
    end.duration_since(start)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
