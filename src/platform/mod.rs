//! Platform layer
//!
//! Wall-clock frame pacing between ticks.

use std::time::{Duration, Instant};

/// Holds the loop to a fixed tick rate
#[derive(Debug)]
pub struct FramePacer {
    period: Duration,
    next: Instant,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick is due.
    ///
    /// Returns how late the caller was when a deadline was already missed.
    /// Missed deadlines are not made up: the schedule restarts from now.
    pub fn wait(&mut self) -> Option<Duration> {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
            None
        } else {
            let late = now - self.next;
            if late > self.period {
                log::debug!("Frame pacer behind by {:?}", late);
            }
            self.next = now + self.period;
            Some(late)
        }
    }
}
