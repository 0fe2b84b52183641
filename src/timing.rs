use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use spin_sleep::SpinSleeper;

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        // Thats 5849424 centuries of scanning, give or take
        self.start.elapsed().as_millis() as u64
    }
}

/// Settle delay for the scanner, spins for the sub-millisecond tail.
pub struct SpinDelay {
    sleeper: SpinSleeper,
}

impl SpinDelay {
    pub fn new() -> Self {
        Self {
            sleeper: SpinSleeper::default(),
        }
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        // accounts for platform dependent sleep resolution
        self.sleeper.sleep(Duration::from_nanos(ns.into()));
    }
}

/// Elapsed-time gate against the last recorded timestamp.
pub struct Cadence {
    pub interval_ms: u64,
    last_mark: u64,
}

impl Cadence {
    pub fn new(interval_ms: u64, start_ms: u64) -> Self {
        Self {
            interval_ms,
            last_mark: start_ms,
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        calc_next_timeout(self.last_mark, now_ms, self.interval_ms) == 0
    }

    pub fn mark(&mut self, now_ms: u64) {
        self.last_mark = now_ms;
    }

    pub fn last_mark(&self) -> u64 {
        self.last_mark
    }
}

#[inline]
fn calc_next_timeout(last: u64, now: u64, timeout: u64) -> u64 {
    let elapsed = now.saturating_sub(last);
    if timeout > elapsed {
        timeout - elapsed
    } else {
        0
    }
}
