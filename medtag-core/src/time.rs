//! Time management for the tag
//!
//! The tag has one clock: a free-running millisecond tick counter that starts
//! at boot and wraps after about 49.7 days. Everything in the core compares
//! ticks by wrapping subtraction, so a wrap in the middle of a sampling period
//! only delays nothing and skips nothing.

/// Milliseconds since boot on the device tick counter (wraps at `u32::MAX`)
pub type Timestamp = u32;

/// Milliseconds from `since` to `now`, correct across counter wraparound
#[inline]
pub const fn elapsed(now: Timestamp, since: Timestamp) -> u32 {
    now.wrapping_sub(since)
}

/// Source of time for the control loop
pub trait TimeSource {
    /// Get current tick in milliseconds
    fn now(&self) -> Timestamp;
}

/// Controllable time source for tests and host simulation
#[derive(Debug, Clone)]
pub struct MockTimeSource {
    timestamp: Timestamp,
}

impl MockTimeSource {
    /// Start the clock at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to an absolute tick
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward, wrapping like the hardware counter
    pub fn advance(&mut self, ms: u32) {
        self.timestamp = self.timestamp.wrapping_add(ms);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Fixed-period rate limiter
///
/// Remembers when work was last accepted and answers whether a full period
/// has passed since then. `due` is pure so callers (and tests) can ask
/// without side effects; `accept` commits the new reference tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cadence {
    period_ms: u32,
    last: Timestamp,
}

impl Cadence {
    /// New cadence whose first period starts at `start`
    pub const fn new(period_ms: u32, start: Timestamp) -> Self {
        Self { period_ms, last: start }
    }

    /// Period between accepted ticks
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Tick of the last accepted sample
    pub const fn last(&self) -> Timestamp {
        self.last
    }

    /// True once a full period has passed since the last accepted tick
    pub const fn due(&self, now: Timestamp) -> bool {
        elapsed(now, self.last) >= self.period_ms
    }

    /// Restart the period at `now`
    pub fn accept(&mut self, now: Timestamp) {
        self.last = now;
    }

    /// Accept `now` if due; returns whether it was
    pub fn poll(&mut self, now: Timestamp) -> bool {
        if self.due(now) {
            self.accept(now);
            true
        } else {
            false
        }
    }
}
