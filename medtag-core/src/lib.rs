//! Core telemetry engine for the MedTag wearable
//!
//! Tracks onboard sensors and turns their state into BLE advertisement
//! payloads a passive scanner can read without connecting.
//! Designed for the same constraints as the tag firmware itself.
//!
//! Key constraints:
//! - Single cooperative control loop, no threads
//! - No heap allocation anywhere in the core
//! - Every input has a defined clamped or defaulted outcome
//!
//! ```no_run
//! use medtag_core::{AdvertisingController, DeviceIdentity, TagConfig};
//! use medtag_core::traits::{Acceleration, SampleSource};
//!
//! struct Board;
//!
//! impl SampleSource for Board {
//!     fn read_temperature(&mut self) -> f32 { 24.8 }
//!     fn read_voltage(&mut self) -> f32 { 3.95 }
//!     fn read_acceleration(&mut self) -> Acceleration { Acceleration::new(0.0, 0.0, 1.0) }
//! }
//!
//! let mut board = Board;
//! let identity = DeviceIdentity::new([0x4C, 0x75, 0x25, 0xCB, 0x80, 0xA2]);
//! let mut controller = AdvertisingController::boot(identity, TagConfig::default(), 0, &mut board);
//!
//! // Called from the main loop every few milliseconds
//! if let Some(broadcast) = controller.tick(10, &mut board) {
//!     // hand broadcast.frame and broadcast.interval_units to the radio
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod payload;
pub mod registry;
pub mod status;
pub mod time;
pub mod trackers;
pub mod traits;

// Public API
pub use config::TagConfig;
pub use controller::{AdvertisingController, Broadcast, SequenceCounter, TagState};
pub use errors::{PayloadError, PayloadResult};
pub use payload::{DeviceIdentity, Frame, FrameFormat, PayloadEncoder, Snapshot};
pub use registry::MedicineRegistry;
pub use trackers::{BatteryTracker, MovementState, MovementTracker, TemperatureTracker};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
