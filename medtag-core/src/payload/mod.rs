//! Advertisement Payloads
//!
//! ## Overview
//!
//! A scanner learns everything about a tag from one advertisement, so every
//! broadcast carries a complete snapshot built fresh from tracker state. Two
//! independent backends turn a [`Snapshot`] into bytes:
//!
//! - [`ManufacturerDataEncoder`] - the structured frame in a manufacturer
//!   specific data block, in one of several layout versions
//! - [`NameEncoder`] - the degraded fallback that squeezes temperature,
//!   battery and sequence into the advertised name, for scanners that only
//!   surface device names
//!
//! Both are pure functions of their input: no hidden state, safe to call
//! repeatedly.
//!
//! ## Frame Versions
//!
//! The manufacturer frame grew one field at a time. Every version is a prefix
//! of the next, which lets old scanners read new tags:
//!
//! | Format | Length | Adds |
//! |---|---|---|
//! | [`FrameFormat::Basic`] | 20 | company id, address, label |
//! | [`FrameFormat::Temperature`] | 22 | temperature |
//! | [`FrameFormat::Battery`] | 23 | battery |
//! | [`FrameFormat::Movement`] | 24 | movement flags |
//! | [`FrameFormat::Full`] | 26 | sequence number |
//!
//! ## Byte Order
//!
//! The company id is little-endian like every other Bluetooth assigned
//! number; temperature and sequence are big-endian. The mix is part of the
//! format that deployed scanners parse and must not be "fixed".
//!
//! ## Usage Example
//!
//! ```rust
//! use medtag_core::payload::{DeviceIdentity, FrameFormat, ManufacturerDataEncoder, PayloadEncoder, Snapshot};
//!
//! let snapshot = Snapshot {
//!     identity: DeviceIdentity::new([0x4C, 0x75, 0x25, 0xCB, 0x80, 0xA2]),
//!     label: "AMOXICILLIN",
//!     temperature_c: 36.55,
//!     battery_percent: 87,
//!     moving: true,
//!     sequence: 258,
//! };
//!
//! let frame = ManufacturerDataEncoder::new(FrameFormat::Full).encode(&snapshot);
//! assert_eq!(frame.len(), 26);
//! assert_eq!(&frame[20..22], &[0x0E, 0x47]);
//! assert_eq!(&frame[24..26], &[0x01, 0x02]);
//! ```

use core::fmt;

use heapless::Vec;

use crate::constants::payload::{ADDRESS_LEN, AD_MAX_LEN, FRAME_MAX_LEN};
use crate::errors::PayloadResult;

pub mod decode;
pub mod envelope;
pub mod manufacturer;
pub mod name;

pub use decode::{decode_manufacturer_data, decode_with_company, DecodedFrame};
pub use envelope::{AdStructures, AdvertisingData, Packets};
pub use manufacturer::ManufacturerDataEncoder;
pub use name::{decode_name, NameEncoder, NameFrame};

/// Largest payload one AD structure can carry (31 minus length and type)
pub const FRAME_CAPACITY: usize = AD_MAX_LEN - 2;

/// Encoded payload bytes
pub type Frame = Vec<u8, FRAME_CAPACITY>;

/// 6-byte hardware address, fixed for the life of the process
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceIdentity(pub [u8; ADDRESS_LEN]);

impl DeviceIdentity {
    /// Identity from raw address bytes, in the order the radio reports them
    pub const fn new(address: [u8; ADDRESS_LEN]) -> Self {
        Self(address)
    }

    /// Raw address bytes
    pub const fn address(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}", a, b, c, d, e, g)
    }
}

impl fmt::Debug for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceIdentity({})", self)
    }
}

/// Everything one broadcast reports, borrowed from tracker state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    /// Tag address
    pub identity: DeviceIdentity,
    /// Medicine name, any length
    pub label: &'a str,
    /// Reported temperature (°C)
    pub temperature_c: f32,
    /// Reported charge (0–100)
    pub battery_percent: u8,
    /// Movement hold window is open
    pub moving: bool,
    /// Sequence number of this broadcast
    pub sequence: u16,
}

/// Payload layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameFormat {
    /// Company id, address, label (20 bytes)
    Basic,
    /// Basic + temperature (22 bytes)
    Temperature,
    /// Temperature + battery (23 bytes)
    Battery,
    /// Battery + movement flags (24 bytes)
    Movement,
    /// Movement + sequence number (26 bytes)
    #[default]
    Full,
    /// Temperature, battery and sequence in the advertised name
    NameEmbedded,
}

impl FrameFormat {
    /// Every manufacturer-data version, shortest first
    pub const MANUFACTURER: [FrameFormat; 5] = [
        FrameFormat::Basic,
        FrameFormat::Temperature,
        FrameFormat::Battery,
        FrameFormat::Movement,
        FrameFormat::Full,
    ];

    /// Length of the manufacturer frame, `None` for the name format
    pub const fn frame_len(&self) -> Option<usize> {
        match self {
            FrameFormat::Basic => Some(20),
            FrameFormat::Temperature => Some(22),
            FrameFormat::Battery => Some(23),
            FrameFormat::Movement => Some(24),
            FrameFormat::Full => Some(FRAME_MAX_LEN),
            FrameFormat::NameEmbedded => None,
        }
    }

    /// Manufacturer format with exactly `len` bytes
    pub fn from_frame_len(len: usize) -> Option<Self> {
        Self::MANUFACTURER
            .iter()
            .copied()
            .find(|format| format.frame_len() == Some(len))
    }

    /// Whether this layout carries a given optional field
    pub const fn has_temperature(&self) -> bool {
        matches!(self, Self::Temperature | Self::Battery | Self::Movement | Self::Full | Self::NameEmbedded)
    }

    /// Battery field present
    pub const fn has_battery(&self) -> bool {
        matches!(self, Self::Battery | Self::Movement | Self::Full | Self::NameEmbedded)
    }

    /// Movement flags present
    pub const fn has_movement(&self) -> bool {
        matches!(self, Self::Movement | Self::Full)
    }

    /// Sequence number present
    pub const fn has_sequence(&self) -> bool {
        matches!(self, Self::Full | Self::NameEmbedded)
    }
}

/// Turns a snapshot into advertised bytes
pub trait PayloadEncoder {
    /// Encode one snapshot
    fn encode(&self, snapshot: &Snapshot<'_>) -> Frame;

    /// Lay an encoded frame out over the advertisement and scan response
    fn packets(&self, frame: &[u8], device_name: &str) -> PayloadResult<Packets>;
}

/// Encoder picked at runtime from [`FrameFormat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyEncoder {
    /// Structured manufacturer data
    Manufacturer(ManufacturerDataEncoder),
    /// Name-embedded fallback
    Name(NameEncoder),
}

impl AnyEncoder {
    /// Backend for `format`, using `company_id` for manufacturer frames
    pub fn for_format(format: FrameFormat, company_id: u16) -> Self {
        match format {
            FrameFormat::NameEmbedded => AnyEncoder::Name(NameEncoder),
            other => AnyEncoder::Manufacturer(ManufacturerDataEncoder::with_company(other, company_id)),
        }
    }
}

impl PayloadEncoder for AnyEncoder {
    fn encode(&self, snapshot: &Snapshot<'_>) -> Frame {
        match self {
            AnyEncoder::Manufacturer(encoder) => encoder.encode(snapshot),
            AnyEncoder::Name(encoder) => encoder.encode(snapshot),
        }
    }

    fn packets(&self, frame: &[u8], device_name: &str) -> PayloadResult<Packets> {
        match self {
            AnyEncoder::Manufacturer(encoder) => encoder.packets(frame, device_name),
            AnyEncoder::Name(encoder) => encoder.packets(frame, device_name),
        }
    }
}
