//! Time-Related Constants
//!
//! Sampling cadences and hold windows for the tracker state machines. All
//! values are milliseconds on the device tick counter.

// ===== TIME UNIT CONVERSIONS =====

/// Microseconds per millisecond.
pub const US_PER_MS: u32 = 1000;

// ===== SAMPLING CADENCES =====

/// Temperature sampling period (milliseconds).
///
/// The DHT22 needs two seconds between reads and skin-contact temperature
/// moves slowly; 30 s keeps the probe mostly idle.
pub const TEMPERATURE_PERIOD_MS: u32 = 30_000;

/// Battery sampling period (milliseconds).
pub const BATTERY_PERIOD_MS: u32 = 10_000;

/// Accelerometer sampling period (milliseconds).
///
/// 10 Hz is enough to catch a pick-up gesture.
pub const MOVEMENT_PERIOD_MS: u32 = 100;

// ===== MOVEMENT WINDOWS =====

/// How long the moving flag holds after the last spike (milliseconds).
///
/// Walking produces spikes every few hundred ms; the hold keeps the flag
/// from flapping between steps.
pub const MOVING_HOLD_MS: u32 = 2_000;

/// Quiet time after which the tag is stationary (milliseconds).
pub const STATIONARY_AFTER_MS: u32 = 30_000;
