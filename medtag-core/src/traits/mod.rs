//! Core Traits and Abstractions for MedTag
//!
//! The core talks to hardware through two seams and organizes its own state
//! machines behind a third:
//!
//! - [`sensor`] - [`SampleSource`], raw readings from the board
//! - [`radio`] - [`Advertiser`], the BLE advertising collaborator
//! - [`Tracker`] - the contract every debounced sensor state machine follows
//!
//! Everything is statically dispatched. The tag runs one control loop, so the
//! traits take `&mut self` and need no `Send`/`Sync` bounds.

pub mod radio;
pub mod sensor;

pub use radio::Advertiser;
pub use sensor::{Acceleration, SampleSource};

use crate::time::Timestamp;

/// Debounced, self rate-limited view of one sensor
///
/// The control loop calls [`sample`](Tracker::sample) on every iteration. The
/// tracker decides whether enough time has passed to read the sensor at all,
/// and reports `true` only when its externally visible state changed, which
/// is what drives a rebroadcast.
pub trait Tracker {
    /// True when the next `sample` call would read the sensor
    fn due(&self, now: Timestamp) -> bool;

    /// Boot-time read that seeds state and starts the first period at `now`
    fn prime<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S);

    /// Read the sensor if due and update state; returns whether reported state changed
    fn sample<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) -> bool;
}
