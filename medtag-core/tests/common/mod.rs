//! Shared fixtures for the integration tests
//!
//! - [`ScriptedSource`] - sensor readings that change at scripted times
//! - [`RecordingRadio`] - an [`Advertiser`] that records every call
//! - [`scenarios`] - canned sensor scripts for whole-tag runs

#![allow(dead_code)]

use medtag_core::{
    time::{MockTimeSource, TimeSource, Timestamp},
    traits::{Acceleration, Advertiser, SampleSource},
};

pub mod scenarios;

/// Address used by every test tag
pub const MAC: [u8; 6] = [0x4C, 0x75, 0x25, 0xCB, 0x80, 0xA2];

/// Acceleration of a tag lying flat
pub const AT_REST: Acceleration = Acceleration { x: 0.0, y: 0.0, z: 1.0 };

/// Acceleration of a tag being carried around
pub const SHAKEN: Acceleration = Acceleration { x: 0.3, y: 0.9, z: 1.1 };

/// One scripted change, applied once the clock reaches `at`
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Temperature reading from then on (°C, NaN for a failed read)
    Temperature(f32),
    /// Voltage reading from then on (V or mV)
    Voltage(f32),
    /// Acceleration reading from then on
    Acceleration(Acceleration),
}

/// Sample source replaying a script against a mock clock
pub struct ScriptedSource {
    pub clock: MockTimeSource,
    pub celsius: f32,
    pub volts: f32,
    pub accel: Acceleration,
    script: Vec<(Timestamp, Step)>,
    pub reads: usize,
}

impl ScriptedSource {
    /// Resting tag at 36.55 °C on a half-charged cell
    pub fn new() -> Self {
        Self::with_readings(36.55, 3.6, AT_REST)
    }

    pub fn with_readings(celsius: f32, volts: f32, accel: Acceleration) -> Self {
        Self {
            clock: MockTimeSource::new(0),
            celsius,
            volts,
            accel,
            script: Vec::new(),
            reads: 0,
        }
    }

    /// Add a change at `at`; steps must be added in time order
    pub fn at(mut self, at: Timestamp, step: Step) -> Self {
        self.script.push((at, step));
        self
    }

    /// Move the clock to `now`, applying every step that became due
    pub fn advance_to(&mut self, now: Timestamp) -> Timestamp {
        self.clock.set(now);
        while let Some(&(at, step)) = self.script.first() {
            if at > now {
                break;
            }
            self.script.remove(0);
            match step {
                Step::Temperature(celsius) => self.celsius = celsius,
                Step::Voltage(volts) => self.volts = volts,
                Step::Acceleration(accel) => self.accel = accel,
            }
        }
        self.clock.now()
    }
}

impl SampleSource for ScriptedSource {
    fn read_temperature(&mut self) -> f32 {
        self.reads += 1;
        self.celsius
    }

    fn read_voltage(&mut self) -> f32 {
        self.reads += 1;
        self.volts
    }

    fn read_acceleration(&mut self) -> Acceleration {
        self.reads += 1;
        self.accel
    }
}

/// Calls seen by [`RecordingRadio`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCall {
    Stop,
    AdvertisementData(Vec<u8>),
    ScanResponseData(Vec<u8>),
    Interval(u16, u16),
    Start,
}

/// Advertiser that records calls and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingRadio {
    pub calls: Vec<RadioCall>,
    pub fail_stop: bool,
    pub fail_start: bool,
}

impl RecordingRadio {
    /// Calls since the last `take`
    pub fn take(&mut self) -> Vec<RadioCall> {
        std::mem::take(&mut self.calls)
    }

    /// Interval of the last `Interval` call
    pub fn last_interval(&self) -> Option<u16> {
        self.calls.iter().rev().find_map(|call| match call {
            RadioCall::Interval(min, _) => Some(*min),
            _ => None,
        })
    }

    /// Scan response of the last `ScanResponseData` call
    pub fn last_scan_response(&self) -> Option<&[u8]> {
        self.calls.iter().rev().find_map(|call| match call {
            RadioCall::ScanResponseData(data) => Some(data.as_slice()),
            _ => None,
        })
    }
}

impl Advertiser for RecordingRadio {
    type Error = &'static str;

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::Stop);
        if self.fail_stop { Err("stop refused") } else { Ok(()) }
    }

    fn set_advertisement_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::AdvertisementData(data.to_vec()));
        Ok(())
    }

    fn set_scan_response_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::ScanResponseData(data.to_vec()));
        Ok(())
    }

    fn set_interval(&mut self, min_units: u16, max_units: u16) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::Interval(min_units, max_units));
        Ok(())
    }

    fn start(&mut self) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::Start);
        if self.fail_start { Err("start refused") } else { Ok(()) }
    }
}
