//! Temperature tracker
//!
//! Reports the probe temperature, but only moves the reported value when a
//! new reading differs by more than the dead band. Sensor noise below the wire
//! resolution would otherwise rebroadcast identical bytes.

use crate::{
    config::TemperatureConfig,
    payload::manufacturer::centidegrees,
    time::{Cadence, Timestamp},
    traits::{SampleSource, Tracker},
};

/// Debounced probe temperature in °C
#[derive(Debug, Clone)]
pub struct TemperatureTracker {
    config: TemperatureConfig,
    cadence: Cadence,
    celsius: f32,
}

impl Default for TemperatureTracker {
    fn default() -> Self {
        Self::new(TemperatureConfig::default(), 0)
    }
}

impl TemperatureTracker {
    /// Tracker reporting the boot temperature, first period starting at `start`
    pub fn new(config: TemperatureConfig, start: Timestamp) -> Self {
        Self {
            cadence: Cadence::new(config.period_ms, start),
            celsius: config.boot_c,
            config,
        }
    }

    /// Last reported temperature (°C)
    pub fn celsius(&self) -> f32 {
        self.celsius
    }

    /// Wire form: hundredths of a degree, clamped to `i16`
    pub fn centidegrees(&self) -> i16 {
        centidegrees(self.celsius)
    }

    /// Offer a raw reading; returns whether the reported value moved
    ///
    /// Non-finite readings are dropped. A finite reading replaces the stored
    /// value only when it differs by more than the dead band.
    pub fn record(&mut self, raw: f32) -> bool {
        if !raw.is_finite() {
            log_warn!("temperature read failed, keeping {} C", self.celsius);
            return false;
        }

        if libm::fabsf(raw - self.celsius) > self.config.deadband_c {
            log_debug!("temperature {} C -> {} C", self.celsius, raw);
            self.celsius = raw;
            true
        } else {
            false
        }
    }
}

impl Tracker for TemperatureTracker {
    fn due(&self, now: Timestamp) -> bool {
        self.cadence.due(now)
    }

    fn prime<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) {
        let raw = source.read_temperature();
        // Boot read is adopted as-is when valid, no dead band
        if raw.is_finite() {
            self.celsius = raw;
        }
        self.cadence.accept(now);
    }

    fn sample<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) -> bool {
        if !self.cadence.poll(now) {
            return false;
        }
        let raw = source.read_temperature();
        self.record(raw)
    }
}
