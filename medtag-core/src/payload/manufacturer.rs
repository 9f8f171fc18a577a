//! Manufacturer-data frame encoder
//!
//! Field encoders are exposed individually so the trackers, the status line
//! and the decoder all agree on one definition of each wire field.

use crate::{
    constants::{
        payload::{
            ADDRESS_OFFSET, BATTERY_OFFSET, COMPANY_OFFSET, FLAG_MOVING, LABEL_LEN, LABEL_OFFSET,
            MOVEMENT_OFFSET, SEQUENCE_OFFSET, TEMPERATURE_OFFSET,
        },
        radio::{AD_FLAGS_GENERAL_DISCOVERABLE, COMPANY_ID},
    },
    errors::{PayloadError, PayloadResult},
};

use super::{AdvertisingData, Frame, FrameFormat, Packets, PayloadEncoder, Snapshot};

/// Temperature as signed hundredths of a degree
///
/// Rounded half away from zero, then clamped to the `i16` range so an absurd
/// reading saturates instead of wrapping to the opposite sign.
pub fn centidegrees(celsius: f32) -> i16 {
    let scaled = libm::roundf(celsius * 100.0);
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Label as exactly [`LABEL_LEN`] ASCII bytes
///
/// Truncated to the first twelve bytes or right-padded with spaces. Bytes
/// outside printable ASCII (including halves of multi-byte characters cut by
/// the truncation) become `?`.
pub fn label_field(label: &str) -> [u8; LABEL_LEN] {
    let mut field = [b' '; LABEL_LEN];
    for (slot, byte) in field.iter_mut().zip(label.bytes()) {
        *slot = if byte.is_ascii_graphic() || byte == b' ' { byte } else { b'?' };
    }
    field
}

/// Battery byte, clamped to 0–100
pub fn battery_field(percent: u8) -> u8 {
    percent.min(100)
}

/// Movement flags byte; reserved bits are always zero
pub fn movement_flags(moving: bool) -> u8 {
    if moving { FLAG_MOVING } else { 0 }
}

/// Write `snapshot` in `format` into `buf`, returning the bytes written
///
/// Fails only if `buf` is shorter than the format, or the format is not a
/// manufacturer-data layout.
pub fn encode_into(
    format: FrameFormat,
    company_id: u16,
    snapshot: &Snapshot<'_>,
    buf: &mut [u8],
) -> PayloadResult<usize> {
    let len = format
        .frame_len()
        .ok_or(PayloadError::Malformed { reason: "not a manufacturer-data format" })?;
    if buf.len() < len {
        return Err(PayloadError::BufferTooSmall { required: len, available: buf.len() });
    }

    buf[COMPANY_OFFSET..ADDRESS_OFFSET].copy_from_slice(&company_id.to_le_bytes());
    buf[ADDRESS_OFFSET..LABEL_OFFSET].copy_from_slice(snapshot.identity.address());
    buf[LABEL_OFFSET..TEMPERATURE_OFFSET].copy_from_slice(&label_field(snapshot.label));

    if format.has_temperature() {
        let temp = centidegrees(snapshot.temperature_c).to_be_bytes();
        buf[TEMPERATURE_OFFSET..BATTERY_OFFSET].copy_from_slice(&temp);
    }
    if format.has_battery() {
        buf[BATTERY_OFFSET] = battery_field(snapshot.battery_percent);
    }
    if format.has_movement() {
        buf[MOVEMENT_OFFSET] = movement_flags(snapshot.moving);
    }
    if format.has_sequence() {
        buf[SEQUENCE_OFFSET..len].copy_from_slice(&snapshot.sequence.to_be_bytes());
    }

    Ok(len)
}

/// Structured frame in a manufacturer-specific data block
///
/// The advertisement packet carries flags and the device name; the frame
/// travels in the scan response, where it has the full 31 bytes to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManufacturerDataEncoder {
    format: FrameFormat,
    company_id: u16,
}

impl Default for ManufacturerDataEncoder {
    fn default() -> Self {
        Self::new(FrameFormat::Full)
    }
}

impl ManufacturerDataEncoder {
    /// Encoder for `format` under the default company id
    ///
    /// [`FrameFormat::NameEmbedded`] has no manufacturer layout and is
    /// replaced by [`FrameFormat::Full`].
    pub fn new(format: FrameFormat) -> Self {
        Self::with_company(format, COMPANY_ID)
    }

    /// Encoder for `format` under a specific company id
    pub fn with_company(format: FrameFormat, company_id: u16) -> Self {
        let format = match format {
            FrameFormat::NameEmbedded => FrameFormat::Full,
            other => other,
        };
        Self { format, company_id }
    }

    /// Layout this encoder writes
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Company id written at offset 0
    pub fn company_id(&self) -> u16 {
        self.company_id
    }
}

impl PayloadEncoder for ManufacturerDataEncoder {
    fn encode(&self, snapshot: &Snapshot<'_>) -> Frame {
        let mut buf = [0u8; super::FRAME_CAPACITY];
        let mut frame = Frame::new();
        // Formats are at most 26 bytes, always within FRAME_CAPACITY
        if let Ok(len) = encode_into(self.format, self.company_id, snapshot, &mut buf) {
            let _ = frame.extend_from_slice(&buf[..len]);
        }
        frame
    }

    fn packets(&self, frame: &[u8], device_name: &str) -> PayloadResult<Packets> {
        let mut advertisement = AdvertisingData::new();
        advertisement.flags(AD_FLAGS_GENERAL_DISCOVERABLE)?;
        advertisement.complete_name(device_name)?;

        let mut scan_response = AdvertisingData::new();
        scan_response.manufacturer_data(frame)?;

        Ok(Packets { advertisement, scan_response })
    }
}
