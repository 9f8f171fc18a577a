//! Tag configuration
//!
//! One struct per tracker plus the advertising policy, aggregated in
//! [`TagConfig`]. `Default` reproduces the shipped firmware; the named
//! constructors are presets for other deployments. With the `serde` feature a
//! host tool can load the whole thing from JSON:
//!
//! ```ignore
//! let config: TagConfig = serde_json::from_str(&text)?;
//! ```

use heapless::String;

use crate::constants::{radio, sensors, time};
use crate::payload::FrameFormat;
use crate::trackers::MovementState;

/// Capacity of the advertised device name
pub const DEVICE_NAME_CAPACITY: usize = 16;

/// Temperature tracker settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureConfig {
    /// Time between probe reads (ms)
    pub period_ms: u32,
    /// Changes at or below this are noise (°C)
    pub deadband_c: f32,
    /// Reported value until the first valid read (°C)
    pub boot_c: f32,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            period_ms: time::TEMPERATURE_PERIOD_MS,
            deadband_c: sensors::TEMPERATURE_DEADBAND_C,
            boot_c: sensors::BOOT_TEMPERATURE_C,
        }
    }
}

/// Battery tracker settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryConfig {
    /// Time between voltage reads (ms)
    pub period_ms: u32,
    /// Voltage reported as 0 %
    pub empty_v: f32,
    /// Voltage reported as 100 %
    pub full_v: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            period_ms: time::BATTERY_PERIOD_MS,
            empty_v: sensors::BATTERY_EMPTY_V,
            full_v: sensors::BATTERY_FULL_V,
        }
    }
}

impl BatteryConfig {
    /// Custom calibration band; swapped if given backwards
    pub fn with_band(mut self, empty_v: f32, full_v: f32) -> Self {
        let (lo, hi) = if empty_v > full_v { (full_v, empty_v) } else { (empty_v, full_v) };
        self.empty_v = lo;
        self.full_v = hi;
        self
    }
}

/// Movement tracker settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementConfig {
    /// Time between IMU reads (ms)
    pub period_ms: u32,
    /// Magnitude above which a read counts as movement (g)
    pub threshold_g: f32,
    /// Moving flag hold after the last spike (ms)
    pub moving_hold_ms: u32,
    /// Quiet time before the tag is stationary (ms)
    pub stationary_after_ms: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            period_ms: time::MOVEMENT_PERIOD_MS,
            threshold_g: sensors::MOVEMENT_THRESHOLD_G,
            moving_hold_ms: time::MOVING_HOLD_MS,
            stationary_after_ms: time::STATIONARY_AFTER_MS,
        }
    }
}

/// Advertising interval per movement state
///
/// Held in milliseconds and converted to radio units on use, so a stack with
/// a different tick size only needs a different conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalPolicy {
    /// While moving (ms)
    pub moving_ms: u32,
    /// Between moving and stationary (ms)
    pub idle_ms: u32,
    /// After the stationary timeout (ms)
    pub stationary_ms: u32,
}

impl Default for IntervalPolicy {
    fn default() -> Self {
        Self {
            moving_ms: radio::MOVING_INTERVAL_MS,
            idle_ms: radio::IDLE_INTERVAL_MS,
            stationary_ms: radio::STATIONARY_INTERVAL_MS,
        }
    }
}

impl IntervalPolicy {
    /// Slower everywhere, for tags stored in a cabinet
    pub fn low_power() -> Self {
        Self {
            moving_ms: 1_000,
            idle_ms: 2_000,
            stationary_ms: 10_000,
        }
    }

    /// Same interval regardless of movement
    pub fn fixed(interval_ms: u32) -> Self {
        Self {
            moving_ms: interval_ms,
            idle_ms: interval_ms,
            stationary_ms: interval_ms,
        }
    }

    /// Interval for a movement state (ms)
    pub fn interval_ms(&self, state: MovementState) -> u32 {
        match state {
            MovementState::Moving => self.moving_ms,
            MovementState::Stationary => self.stationary_ms,
            MovementState::Idle => self.idle_ms,
        }
    }

    /// Interval for a movement state in 0.625 ms radio units
    pub fn interval_units(&self, state: MovementState) -> u16 {
        ms_to_units(self.interval_ms(state))
    }
}

/// Convert milliseconds to 0.625 ms advertising units, clamped to the
/// range the BLE specification allows for legacy advertising
pub fn ms_to_units(ms: u32) -> u16 {
    let units = (ms as u64 * time::US_PER_MS as u64) / radio::INTERVAL_UNIT_US as u64;
    units.clamp(radio::MIN_INTERVAL_UNITS as u64, radio::MAX_INTERVAL_UNITS as u64) as u16
}

/// Everything the tag needs besides its address
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagConfig {
    /// Temperature tracker
    pub temperature: TemperatureConfig,
    /// Battery tracker
    pub battery: BatteryConfig,
    /// Movement tracker
    pub movement: MovementConfig,
    /// Advertising interval policy
    pub intervals: IntervalPolicy,
    /// Frame layout to advertise
    pub format: FrameFormat,
    /// Company identifier for the manufacturer-data block
    pub company_id: u16,
    /// Complete local name in the advertisement packet
    pub device_name: String<DEVICE_NAME_CAPACITY>,
}

impl Default for TagConfig {
    fn default() -> Self {
        let mut device_name = String::new();
        // Fits: DEVICE_NAME is shorter than the capacity
        let _ = device_name.push_str(radio::DEVICE_NAME);

        Self {
            temperature: TemperatureConfig::default(),
            battery: BatteryConfig::default(),
            movement: MovementConfig::default(),
            intervals: IntervalPolicy::default(),
            format: FrameFormat::default(),
            company_id: radio::COMPANY_ID,
            device_name,
        }
    }
}

impl TagConfig {
    /// Builder-style frame format override
    pub fn with_format(mut self, format: FrameFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder-style interval policy override
    pub fn with_intervals(mut self, intervals: IntervalPolicy) -> Self {
        self.intervals = intervals;
        self
    }
}
