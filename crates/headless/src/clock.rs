use std::{
    thread::sleep,
    time::{Duration, Instant},
};

use log::debug;

/// Paces ticks at a fixed period against a monotonic clock.
pub struct FixedClock {
    period: Duration,
    next: Instant,
}

impl FixedClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Blocks until the next tick is due. A late host does not try to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            sleep(self.next - now);
            self.next += self.period;
        } else {
            debug!("Tick late by {:?}", now - self.next);
            self.next = now + self.period;
        }
    }
}
