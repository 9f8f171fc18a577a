//! Advertising Controller
//!
//! ## Overview
//!
//! The controller owns all tag state and is driven by the control loop:
//!
//! ```text
//!   tick(now) ──► poll trackers ──► any change or label edit?
//!                                        │ no ──► None
//!                                        │ yes
//!                                        ▼
//!                 snapshot ──► encode ──► pick interval ──► Broadcast
//!                                                              │
//!                                      apply(radio) ◄──────────┘
//!                                  stop → data → interval → start
//! ```
//!
//! A tick with nothing new does nothing: the radio keeps repeating the last
//! packet on its own, so an unchanged tag costs no CPU time and no radio
//! reconfiguration.
//!
//! ## Sequence Numbers
//!
//! Every broadcast carries the current [`SequenceCounter`] value, which then
//! advances with wrapping arithmetic. The boot broadcast carries 0 and 65535
//! is followed by 0. Scanners use the number to drop repeats of a packet they
//! already saw.

use heapless::String;

use crate::{
    config::{IntervalPolicy, TagConfig, DEVICE_NAME_CAPACITY},
    payload::{AdvertisingData, AnyEncoder, DeviceIdentity, Frame, PayloadEncoder, Snapshot},
    registry::MedicineRegistry,
    status::StatusLine,
    time::Timestamp,
    trackers::{BatteryTracker, MovementState, MovementTracker, TemperatureTracker},
    traits::{Advertiser, SampleSource, Tracker},
};

/// Wrapping 16-bit broadcast counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceCounter(u16);

impl SequenceCounter {
    /// Counter starting at `value`
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Number the next broadcast will carry
    pub const fn current(&self) -> u16 {
        self.0
    }

    /// Hand out the current number and move past it
    pub fn advance(&mut self) -> u16 {
        let current = self.0;
        self.0 = self.0.wrapping_add(1);
        current
    }
}

/// Everything the tag knows, owned by the control loop
#[derive(Debug, Clone)]
pub struct TagState {
    /// Radio address, fixed for the life of the process
    pub identity: DeviceIdentity,
    /// Debounced temperature
    pub temperature: TemperatureTracker,
    /// Battery charge
    pub battery: BatteryTracker,
    /// Motion classification
    pub movement: MovementTracker,
    /// Medicine label
    pub registry: MedicineRegistry,
    /// Next broadcast number
    pub sequence: SequenceCounter,
}

impl TagState {
    /// Build state from `config` and take one reading of every sensor
    pub fn boot<S: SampleSource + ?Sized>(
        identity: DeviceIdentity,
        config: &TagConfig,
        now: Timestamp,
        source: &mut S,
    ) -> Self {
        let mut state = Self {
            identity,
            temperature: TemperatureTracker::new(config.temperature, now),
            battery: BatteryTracker::new(config.battery, now),
            movement: MovementTracker::new(config.movement, now),
            registry: MedicineRegistry::default(),
            sequence: SequenceCounter::default(),
        };

        state.temperature.prime(now, source);
        state.battery.prime(now, source);
        state.movement.prime(now, source);
        state
    }

    /// Sample every due tracker; returns whether any reported state changed
    ///
    /// All trackers are polled even once one has changed, so none of them
    /// falls behind its period.
    pub fn poll<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) -> bool {
        let temperature = self.temperature.sample(now, source);
        let battery = self.battery.sample(now, source);
        let movement = self.movement.sample(now, source);
        temperature | battery | movement
    }

    /// View of the current state carrying the next sequence number
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            identity: self.identity,
            label: self.registry.get(),
            temperature_c: self.temperature.celsius(),
            battery_percent: self.battery.percent(),
            moving: self.movement.is_moving(),
            sequence: self.sequence.current(),
        }
    }

    /// Human-readable one-line status
    pub fn status(&self) -> StatusLine<'_> {
        StatusLine::new(self.snapshot(), self.movement.state())
    }
}

/// One radio reconfiguration's worth of output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    /// Encoded payload
    pub frame: Frame,
    /// Advertising interval in 0.625 ms units
    pub interval_units: u16,
    /// Sequence number carried by `frame`
    pub sequence: u16,
    /// Motion state that picked the interval
    pub movement: MovementState,
    /// Advertisement packet
    pub advertisement: AdvertisingData,
    /// Scan response packet
    pub scan_response: AdvertisingData,
}

/// Decides when and what the tag advertises
#[derive(Debug, Clone)]
pub struct AdvertisingController {
    state: TagState,
    encoder: AnyEncoder,
    intervals: IntervalPolicy,
    device_name: String<DEVICE_NAME_CAPACITY>,
    dirty: bool,
}

impl AdvertisingController {
    /// Boot the tag: prime every tracker and schedule the first broadcast
    pub fn boot<S: SampleSource + ?Sized>(
        identity: DeviceIdentity,
        config: TagConfig,
        now: Timestamp,
        source: &mut S,
    ) -> Self {
        let state = TagState::boot(identity, &config, now, source);
        log_info!("tag booted, format {}", config.format.frame_len().unwrap_or(0));

        Self {
            state,
            encoder: AnyEncoder::for_format(config.format, config.company_id),
            intervals: config.intervals,
            device_name: config.device_name,
            dirty: true,
        }
    }

    /// Current tag state
    pub fn state(&self) -> &TagState {
        &self.state
    }

    /// Medicine label, for edits from the application shell
    pub fn registry_mut(&mut self) -> &mut MedicineRegistry {
        &mut self.state.registry
    }

    /// Replace the medicine label; broadcast on the next tick
    pub fn set_label(&mut self, name: &str) {
        self.state.registry.set(name);
    }

    /// Flip between the two well-known medicines; broadcast on the next tick
    pub fn toggle_label(&mut self) {
        self.state.registry.toggle();
    }

    /// True when the next tick will broadcast regardless of sensors
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.state.registry.is_edited()
    }

    /// Advance the control loop to `now`
    ///
    /// Returns the broadcast to put on air, or `None` when nothing changed.
    pub fn tick<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) -> Option<Broadcast> {
        let sensors = self.state.poll(now, source);
        let edited = self.state.registry.take_edited();
        self.dirty |= sensors | edited;
        if !self.dirty {
            return None;
        }

        let movement = self.state.movement.state();
        let frame = self.encoder.encode(&self.state.snapshot());
        let packets = match self.encoder.packets(&frame, &self.device_name) {
            Ok(packets) => packets,
            Err(_) => {
                // Stay dirty; a later snapshot may fit
                log_warn!("payload does not fit, {} bytes", frame.len());
                return None;
            }
        };

        let sequence = self.state.sequence.advance();
        self.dirty = false;
        let interval_units = self.intervals.interval_units(movement);
        log_info!("broadcast seq {} ({}, {} units)", sequence, movement.name(), interval_units);

        Some(Broadcast {
            frame,
            interval_units,
            sequence,
            movement,
            advertisement: packets.advertisement,
            scan_response: packets.scan_response,
        })
    }

    /// [`tick`](Self::tick), then push any broadcast to `radio`
    pub fn run<S, A>(&mut self, now: Timestamp, source: &mut S, radio: &mut A) -> Option<Broadcast>
    where
        S: SampleSource + ?Sized,
        A: Advertiser,
    {
        let broadcast = self.tick(now, source)?;
        // Failures are logged inside apply and never retried
        let _ = apply(radio, &broadcast);
        Some(broadcast)
    }
}

/// Stop advertising, load `broadcast`, start again
///
/// Every step is attempted even after a failure so the radio ends up as close
/// to the intended configuration as it can get. Each failure is logged; the
/// first one is returned.
pub fn apply<A: Advertiser>(radio: &mut A, broadcast: &Broadcast) -> Result<(), A::Error> {
    let units = broadcast.interval_units;
    let results = [
        ("stop", radio.stop()),
        ("advertisement data", radio.set_advertisement_data(broadcast.advertisement.as_bytes())),
        ("scan response", radio.set_scan_response_data(broadcast.scan_response.as_bytes())),
        ("interval", radio.set_interval(units, units)),
        ("start", radio.start()),
    ];

    let mut first = Ok(());
    for (step, result) in results {
        if let Err(err) = result {
            log_warn!("radio {} failed", step);
            if first.is_ok() {
                first = Err(err);
            }
        }
    }
    first
}
