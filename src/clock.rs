// --- Interval clocks -------------------------------------------------------

/// IntervalClock turns frame timestamps into whole interval ticks so fixed-rate
/// timers can run off the animation frame instead of their own callbacks.
#[derive(Clone, Debug)]
pub struct IntervalClock {
    period_ms: f64,
    start_ms: f64,  // performance.now() when armed
    last_idx: i64,  // index of last consumed tick
}

impl IntervalClock {
    pub fn new(period_ms: f64, now: f64) -> Self {
        Self {
            period_ms,
            start_ms: now,
            last_idx: 0,
        }
    }

    /// Fractional number of periods elapsed since the clock was armed.
    pub fn current(&self, now: f64) -> f64 {
        (now - self.start_ms) / self.period_ms
    }

    /// Number of ticks that became due since the last call. The first tick fires
    /// one full period after arming.
    pub fn due(&mut self, now: f64) -> u32 {
        let whole = self.current(now).floor() as i64;
        if whole <= self.last_idx {
            return 0;
        }
        let n = whole - self.last_idx;
        self.last_idx = whole;
        n as u32
    }

    /// Re-arm at `now`, dropping any pending ticks.
    pub fn reset(&mut self, now: f64) {
        self.start_ms = now;
        self.last_idx = 0;
    }
}
