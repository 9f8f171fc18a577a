//! Debounced Sensor Trackers
//!
//! ## Overview
//!
//! Each tracker turns a noisy, rate-limited sensor into a stable reported
//! value and answers one question per loop iteration: did the value a scanner
//! would see just change? Only a `true` answer costs radio airtime, so each
//! tracker filters the input in the way that suits its sensor:
//!
//! | Tracker | Cadence | Filter |
//! |---|---|---|
//! | [`TemperatureTracker`] | 30 s | dead band of 0.01 °C, NaN skipped |
//! | [`BatteryTracker`] | 10 s | change detected on whole percent only |
//! | [`MovementTracker`] | 100 ms | hold window and stationary timeout |
//!
//! ## Invalid Input
//!
//! No tracker ever fails. A NaN reading is a transient glitch and leaves the
//! last good value in place; out-of-range values are clamped when they are
//! mapped or encoded.
//!
//! ## Usage Example
//!
//! ```rust
//! use medtag_core::config::TemperatureConfig;
//! use medtag_core::trackers::TemperatureTracker;
//!
//! let mut tracker = TemperatureTracker::new(TemperatureConfig::default(), 0);
//!
//! assert!(tracker.record(36.55));
//! assert_eq!(tracker.celsius(), 36.55);
//! assert!(!tracker.record(f32::NAN));
//! assert!(!tracker.record(36.555));
//! ```

mod battery;
mod movement;
mod temperature;

pub use battery::{normalize_voltage, voltage_to_percent, BatteryTracker};
pub use movement::{MovementState, MovementTracker};
pub use temperature::TemperatureTracker;
