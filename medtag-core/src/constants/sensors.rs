//! Sensor Calibration and Change Thresholds
//!
//! Values come from the parts fitted to the tag: a DHT22 temperature probe,
//! the AXP192 power-management chip reporting the Li-Po cell voltage, and the
//! MPU6886 IMU.

// ===== TEMPERATURE =====

/// Reported temperature before the first valid reading (°C).
///
/// Room temperature, so a tag that boots with a dead probe still advertises a
/// plausible value instead of zero.
pub const BOOT_TEMPERATURE_C: f32 = 25.0;

/// Minimum change that counts as a new temperature (°C).
///
/// Equal to the wire resolution (hundredths of a degree). Smaller jitter
/// would not change the encoded value anyway.
pub const TEMPERATURE_DEADBAND_C: f32 = 0.01;

// ===== BATTERY =====

/// Cell voltage mapped to 0 % (V).
///
/// Single-cell Li-Po cut-off under light load.
pub const BATTERY_EMPTY_V: f32 = 3.0;

/// Cell voltage mapped to 100 % (V).
///
/// Li-Po end-of-charge voltage.
pub const BATTERY_FULL_V: f32 = 4.2;

/// Raw readings above this magnitude are millivolts, not volts.
///
/// No single cell gets near 10 V, and no millivolt reading gets below it.
pub const MILLIVOLT_DETECT_THRESHOLD: f32 = 10.0;

/// Millivolts per volt.
pub const MV_PER_V: f32 = 1000.0;

// ===== MOVEMENT =====

/// Acceleration magnitude that counts as movement (g).
///
/// A tag at rest reads 1.0 g (gravity only). 5 % headroom absorbs IMU noise.
pub const MOVEMENT_THRESHOLD_G: f32 = 1.05;

/// Magnitude reported before the first IMU read (g).
pub const REST_MAGNITUDE_G: f32 = 1.0;
