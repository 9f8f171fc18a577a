//! Constants for MedTag Core
//!
//! Centralized, documented numeric values used throughout the tag firmware.
//! Every default in [`crate::config`] is defined here so the byte tables in
//! tests and the firmware agree on a single source.
//!
//! ## Organization
//!
//! - **Sensors**: calibration bands and change thresholds
//! - **Time**: sampling cadences and hold windows
//! - **Radio**: advertising intervals and on-air identifiers
//! - **Payload**: wire-format field sizes and offsets

/// Sensor calibration bands and change thresholds.
pub mod sensors;

/// Sampling cadences, hold windows and unit conversions.
pub mod time;

/// Advertising intervals and on-air identifiers.
pub mod radio;

/// Wire-format field sizes and offsets.
pub mod payload;

// Re-export commonly used constants for convenience
pub use sensors::{
    BATTERY_FULL_V, BATTERY_EMPTY_V, BOOT_TEMPERATURE_C,
    MOVEMENT_THRESHOLD_G, TEMPERATURE_DEADBAND_C,
};

pub use time::{
    TEMPERATURE_PERIOD_MS, BATTERY_PERIOD_MS, MOVEMENT_PERIOD_MS,
    MOVING_HOLD_MS, STATIONARY_AFTER_MS,
};

pub use radio::{
    COMPANY_ID, DEVICE_NAME, MOVING_INTERVAL_MS, IDLE_INTERVAL_MS, STATIONARY_INTERVAL_MS,
};

pub use payload::{LABEL_LEN, FRAME_MAX_LEN};
