use std::time::{Duration, Instant};

/// Counts frames and yields the average rate once per reporting period.
pub struct Counter {
    last_time: Instant,
    report_every: Duration,
    counter: u32,
}

impl Counter {
    pub fn new(report_every_secs: u8) -> Self {
        Self::starting_at(Instant::now(), report_every_secs)
    }

    pub fn starting_at(start: Instant, report_every_secs: u8) -> Self {
        Self {
            last_time: start,
            report_every: Duration::from_secs(report_every_secs as u64),
            counter: 0,
        }
    }

    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.counter += 1;
        let elapsed = now.saturating_duration_since(self.last_time);
        if elapsed < self.report_every || elapsed.is_zero() {
            return None;
        }
        let fps = self.counter as f64 / elapsed.as_secs_f64();
        self.last_time = now;
        self.counter = 0;
        Some(fps)
    }
}
