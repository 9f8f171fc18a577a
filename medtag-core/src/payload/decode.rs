//! Manufacturer-frame decoder
//!
//! Reads any supported frame version back into its fields. The version is
//! identified by length alone; fields a shorter version does not carry come
//! back as `None`.

use crate::{
    constants::{
        payload::{
            ADDRESS_LEN, ADDRESS_OFFSET, BATTERY_OFFSET, COMPANY_OFFSET, FLAG_MOVING, LABEL_LEN,
            LABEL_OFFSET, MOVEMENT_OFFSET, SEQUENCE_OFFSET, TEMPERATURE_OFFSET,
        },
        radio::COMPANY_ID,
    },
    errors::{PayloadError, PayloadResult},
};

use super::{DeviceIdentity, FrameFormat};

/// Shortest frame on the air
const MIN_FRAME_LEN: usize = LABEL_OFFSET + LABEL_LEN;

/// Fields of one received manufacturer frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Version the length identified
    pub format: FrameFormat,
    /// Company id from offset 0
    pub company_id: u16,
    /// Tag address
    pub address: DeviceIdentity,
    /// Raw label field, space padded
    pub label: [u8; LABEL_LEN],
    /// Temperature in hundredths of a degree
    pub centidegrees: Option<i16>,
    /// Charge (0–100)
    pub battery: Option<u8>,
    /// Movement hold window open
    pub moving: Option<bool>,
    /// Broadcast sequence number
    pub sequence: Option<u16>,
}

impl DecodedFrame {
    /// Label without its padding
    pub fn label(&self) -> &str {
        // Validated as ASCII during decoding
        core::str::from_utf8(&self.label)
            .unwrap_or_default()
            .trim_end_matches(' ')
    }

    /// Temperature in °C, if the version carries it
    pub fn temperature_c(&self) -> Option<f32> {
        self.centidegrees.map(|centi| centi as f32 / 100.0)
    }
}

/// Decode a frame that must carry our company id
pub fn decode_manufacturer_data(bytes: &[u8]) -> PayloadResult<DecodedFrame> {
    decode_with_company(bytes, COMPANY_ID)
}

/// Decode a frame that must carry `expected` as its company id
pub fn decode_with_company(bytes: &[u8], expected: u16) -> PayloadResult<DecodedFrame> {
    if bytes.len() < MIN_FRAME_LEN {
        return Err(PayloadError::Truncated { required: MIN_FRAME_LEN, actual: bytes.len() });
    }
    let format = FrameFormat::from_frame_len(bytes.len())
        .ok_or(PayloadError::UnsupportedLength(bytes.len()))?;

    let company_id = u16::from_le_bytes([bytes[COMPANY_OFFSET], bytes[COMPANY_OFFSET + 1]]);
    if company_id != expected {
        return Err(PayloadError::UnexpectedCompany(company_id));
    }

    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&bytes[ADDRESS_OFFSET..LABEL_OFFSET]);

    let mut label = [0u8; LABEL_LEN];
    label.copy_from_slice(&bytes[LABEL_OFFSET..TEMPERATURE_OFFSET]);
    if !label.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return Err(PayloadError::Malformed { reason: "label is not printable ASCII" });
    }

    let centidegrees = format
        .has_temperature()
        .then(|| i16::from_be_bytes([bytes[TEMPERATURE_OFFSET], bytes[TEMPERATURE_OFFSET + 1]]));

    let battery = match format.has_battery().then(|| bytes[BATTERY_OFFSET]) {
        Some(percent) if percent > 100 => {
            return Err(PayloadError::Malformed { reason: "battery above 100" });
        }
        other => other,
    };

    let moving = match format.has_movement().then(|| bytes[MOVEMENT_OFFSET]) {
        Some(flags) if flags & !FLAG_MOVING != 0 => {
            return Err(PayloadError::Malformed { reason: "reserved movement bits set" });
        }
        other => other.map(|flags| flags & FLAG_MOVING != 0),
    };

    let sequence = format
        .has_sequence()
        .then(|| u16::from_be_bytes([bytes[SEQUENCE_OFFSET], bytes[SEQUENCE_OFFSET + 1]]));

    Ok(DecodedFrame {
        format,
        company_id,
        address: DeviceIdentity::new(address),
        label,
        centidegrees,
        battery,
        moving,
        sequence,
    })
}
