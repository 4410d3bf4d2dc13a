//! Frame pacing.
//!
//! The sleep at the end of each tick is the loop's only suspension point.
//! Time is read and slept through a `TimeSource` so tests can run the loop
//! without ever blocking.

use std::time::{Duration, Instant};

pub trait TimeSource {
    /// Time since some fixed origin.
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time with real sleeps.
#[derive(Debug)]
pub struct SystemTime {
    origin: Instant,
}

impl SystemTime {
    pub fn new() -> Self {
        SystemTime {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTime {
    fn default() -> Self {
        SystemTime::new()
    }
}

impl TimeSource for SystemTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Time that only moves when told to.  Sleeping advances it instantly and
/// is recorded.
#[derive(Debug, Default)]
pub struct ManualTime {
    now: Duration,
    pub slept: Vec<Duration>,
}

impl ManualTime {
    pub fn new() -> Self {
        ManualTime::default()
    }

    /// Simulate work taking `duration`.
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.slept.push(duration);
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Clock<T: TimeSource> {
    interval: Duration,
    time: T,
    started: Option<Duration>,
    last: Option<Duration>,
    ticks: u64,
}

impl<T: TimeSource> Clock<T> {
    pub fn new(fps: u32, time: T) -> Self {
        Clock {
            interval: Duration::from_secs(1) / fps.max(1),
            time,
            started: None,
            last: None,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut T {
        &mut self.time
    }

    /// Sleep out whatever is left of the current tick and return how long the
    /// whole tick took.  The first call only starts the clock.
    pub fn tick(&mut self) -> Duration {
        let now = self.time.now();
        let Some(last) = self.last else {
            self.started = Some(now);
            self.last = Some(now);
            return Duration::ZERO;
        };
        let elapsed = now.saturating_sub(last);
        if elapsed < self.interval {
            self.time.sleep(self.interval - elapsed);
        }
        let now = self.time.now();
        self.last = Some(now);
        self.ticks += 1;
        now.saturating_sub(last)
    }

    /// Achieved ticks per second since the first `tick`.
    pub fn fps(&self) -> f64 {
        match (self.started, self.last) {
            (Some(started), Some(last)) if last > started => {
                self.ticks as f64 / (last - started).as_secs_f64()
            }
            _ => 0.0,
        }
    }
}
