//! Battery tracker
//!
//! Maps cell voltage linearly onto 0–100 % across the calibration band and
//! reports a change only when the whole-percent value moves. The voltage
//! itself drifts constantly under load and is refreshed on every read without
//! counting as a change.

use crate::{
    config::BatteryConfig,
    constants::sensors::{MILLIVOLT_DETECT_THRESHOLD, MV_PER_V},
    time::{Cadence, Timestamp},
    traits::{SampleSource, Tracker},
};

/// Normalize a raw power-chip reading to volts
///
/// Some power-management backends report millivolts, others volts. A single
/// cell never reaches 10 V, so anything above that is millivolts.
pub fn normalize_voltage(raw: f32) -> f32 {
    if raw > MILLIVOLT_DETECT_THRESHOLD {
        raw / MV_PER_V
    } else {
        raw
    }
}

/// Percentage for `volts` on the band `[empty_v, full_v]`
///
/// Clamped to the band, scaled, rounded half away from zero, clamped again so
/// rounding at the edges can never produce 101.
pub fn voltage_to_percent(volts: f32, empty_v: f32, full_v: f32) -> u8 {
    if !(full_v > empty_v) {
        // Degenerate band: a step at full_v
        return if volts >= full_v { 100 } else { 0 };
    }

    let clamped = volts.clamp(empty_v, full_v);
    let scaled = (clamped - empty_v) * 100.0 / (full_v - empty_v);
    libm::roundf(scaled).clamp(0.0, 100.0) as u8
}

/// Battery voltage and whole-percent charge
#[derive(Debug, Clone)]
pub struct BatteryTracker {
    config: BatteryConfig,
    cadence: Cadence,
    voltage: f32,
    percent: u8,
}

impl Default for BatteryTracker {
    fn default() -> Self {
        Self::new(BatteryConfig::default(), 0)
    }
}

impl BatteryTracker {
    /// Tracker reporting 0 V / 0 %, first period starting at `start`
    pub fn new(config: BatteryConfig, start: Timestamp) -> Self {
        Self {
            cadence: Cadence::new(config.period_ms, start),
            config,
            voltage: 0.0,
            percent: 0,
        }
    }

    /// Last measured voltage (V)
    pub fn voltage(&self) -> f32 {
        self.voltage
    }

    /// Last reported charge (0–100)
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Percentage this tracker's calibration gives for `volts`
    pub fn percent_for(&self, volts: f32) -> u8 {
        voltage_to_percent(volts, self.config.empty_v, self.config.full_v)
    }

    /// Offer a raw reading; returns whether the percentage changed
    pub fn record(&mut self, raw: f32) -> bool {
        if raw.is_nan() {
            log_warn!("battery read failed, keeping {} V", self.voltage);
            return false;
        }

        let volts = normalize_voltage(raw);
        let percent = self.percent_for(volts);
        log_debug!("battery {} V, {} %", volts, percent);

        // Voltage always follows the cell, the percentage is what scanners see
        self.voltage = volts;
        if percent != self.percent {
            self.percent = percent;
            true
        } else {
            false
        }
    }
}

impl Tracker for BatteryTracker {
    fn due(&self, now: Timestamp) -> bool {
        self.cadence.due(now)
    }

    fn prime<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) {
        self.record(source.read_voltage());
        self.cadence.accept(now);
    }

    fn sample<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) -> bool {
        if !self.cadence.poll(now) {
            return false;
        }
        let raw = source.read_voltage();
        self.record(raw)
    }
}
