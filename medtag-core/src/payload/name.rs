//! Name-embedded fallback format
//!
//! Some scanner apps only surface the advertised device name. For those the
//! tag renames itself `MT{centidegrees}_{battery}_{sequence}` on every
//! broadcast, e.g. `MT3655_87_12` for 36.55 °C, 87 % and sequence 12. The
//! label, address and movement flag are not carried.

use core::fmt::Write;

use heapless::String;

use crate::{
    constants::radio::{AD_FLAGS_GENERAL_DISCOVERABLE, NAME_FORMAT_PREFIX},
    errors::{PayloadError, PayloadResult},
};

use super::{
    manufacturer::{battery_field, centidegrees},
    AdvertisingData, Frame, Packets, PayloadEncoder, Snapshot, FRAME_CAPACITY,
};

/// Values carried by a name-embedded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameFrame {
    /// Temperature in hundredths of a degree
    pub centidegrees: i16,
    /// Charge (0–100)
    pub battery: u8,
    /// Broadcast sequence number
    pub sequence: u16,
}

impl NameFrame {
    /// Temperature in °C
    pub fn temperature_c(&self) -> f32 {
        self.centidegrees as f32 / 100.0
    }
}

/// Encodes the snapshot into the advertised name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameEncoder;

impl PayloadEncoder for NameEncoder {
    fn encode(&self, snapshot: &Snapshot<'_>) -> Frame {
        let mut name: String<FRAME_CAPACITY> = String::new();
        // Longest case is "MT-32768_100_65535", well within capacity
        let _ = write!(
            name,
            "{}{}_{}_{}",
            NAME_FORMAT_PREFIX,
            centidegrees(snapshot.temperature_c),
            battery_field(snapshot.battery_percent),
            snapshot.sequence
        );

        let mut frame = Frame::new();
        let _ = frame.extend_from_slice(name.as_bytes());
        frame
    }

    /// The encoded name replaces `device_name`; the scan response stays empty
    fn packets(&self, frame: &[u8], _device_name: &str) -> PayloadResult<Packets> {
        let name = core::str::from_utf8(frame)
            .map_err(|_| PayloadError::Malformed { reason: "name is not UTF-8" })?;

        let mut advertisement = AdvertisingData::new();
        advertisement.flags(AD_FLAGS_GENERAL_DISCOVERABLE)?;
        advertisement.complete_name(name)?;

        Ok(Packets { advertisement, scan_response: AdvertisingData::new() })
    }
}

/// Parse an advertised name of the form `MT{t}_{b}_{s}`
///
/// The temperature may carry a leading `-`. Anything after the sequence
/// number, a battery above 100, or a field out of range is rejected.
pub fn decode_name(name: &str) -> PayloadResult<NameFrame> {
    let body = name
        .strip_prefix(NAME_FORMAT_PREFIX)
        .ok_or(PayloadError::Malformed { reason: "missing name prefix" })?;

    let mut fields = body.split('_');
    let centidegrees = parse_field(fields.next(), true, "bad temperature field")?;
    let battery = parse_field(fields.next(), false, "bad battery field")?;
    let sequence = parse_field(fields.next(), false, "bad sequence field")?;
    if fields.next().is_some() {
        return Err(PayloadError::Malformed { reason: "trailing name fields" });
    }

    let battery: u8 = battery
        .try_into()
        .ok()
        .filter(|percent| *percent <= 100)
        .ok_or(PayloadError::Malformed { reason: "battery out of range" })?;

    Ok(NameFrame {
        centidegrees: centidegrees
            .try_into()
            .map_err(|_| PayloadError::Malformed { reason: "temperature out of range" })?,
        battery,
        sequence: sequence
            .try_into()
            .map_err(|_| PayloadError::Malformed { reason: "sequence out of range" })?,
    })
}

// Digits only, with an optional leading '-' where allowed. `str::parse` alone
// would also take a '+'.
fn parse_field(field: Option<&str>, signed: bool, reason: &'static str) -> PayloadResult<i32> {
    let field = field.ok_or(PayloadError::Malformed { reason })?;
    let digits = match field.strip_prefix('-') {
        Some(rest) if signed => rest,
        _ => field,
    };
    if digits.is_empty() || digits.len() > 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PayloadError::Malformed { reason });
    }
    field.parse().map_err(|_| PayloadError::Malformed { reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::DeviceIdentity;
    use pretty_assertions::assert_eq;

    fn snapshot(temperature_c: f32, battery_percent: u8, sequence: u16) -> Snapshot<'static> {
        Snapshot {
            identity: DeviceIdentity::default(),
            label: "PANADOL",
            temperature_c,
            battery_percent,
            moving: false,
            sequence,
        }
    }

    #[test]
    fn encodes_name() {
        let frame = NameEncoder.encode(&snapshot(36.55, 87, 12));
        assert_eq!(frame.as_slice(), b"MT3655_87_12");

        let frame = NameEncoder.encode(&snapshot(-5.0, 100, 65_535));
        assert_eq!(frame.as_slice(), b"MT-500_100_65535");
    }

    #[test]
    fn name_replaces_device_name() {
        let frame = NameEncoder.encode(&snapshot(25.0, 50, 0));
        let packets = NameEncoder.packets(&frame, "MED_TAG").unwrap();

        let mut expected = std::vec![0x02, 0x01, 0x06, 0x0C, 0x09];
        expected.extend_from_slice(b"MT2500_50_0");
        assert_eq!(packets.advertisement.as_bytes(), expected.as_slice());
        assert!(packets.scan_response.is_empty());
    }

    #[test]
    fn worst_case_fits_one_packet() {
        let frame = NameEncoder.encode(&snapshot(-400.0, 255, u16::MAX));
        assert_eq!(frame.as_slice(), b"MT-32768_100_65535");
        assert!(NameEncoder.packets(&frame, "").is_ok());
    }

    #[test]
    fn decodes_what_it_encodes() {
        let frame = NameEncoder.encode(&snapshot(-12.34, 3, 400));
        let name = core::str::from_utf8(&frame).unwrap();
        let decoded = decode_name(name).unwrap();

        assert_eq!(decoded, NameFrame { centidegrees: -1234, battery: 3, sequence: 400 });
        assert!((decoded.temperature_c() + 12.34).abs() < 1e-4);
    }

    #[test]
    fn rejects_foreign_names() {
        for name in [
            "MED_TAG",
            "MT",
            "MT3655_87",
            "MT3655_87_12_1",
            "MT+3655_87_12",
            "MT3655_-87_12",
            "MT3655_101_12",
            "MT3655_87_70000",
            "MT40000_87_12",
            "MTabc_87_12",
            "MT_87_12",
        ] {
            assert!(decode_name(name).is_err(), "{name} should not parse");
        }
    }
}
