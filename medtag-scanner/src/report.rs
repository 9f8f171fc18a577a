//! Gateway reports
//!
//! One [`TagReport`] per accepted advertisement, serialized to JSON for the
//! message broker. Fields a frame version does not carry are left out of the
//! JSON rather than sent as zero.

use medtag_core::{
    payload::{DecodedFrame, NameFrame},
    DeviceIdentity,
};
use serde::{Deserialize, Serialize};

use crate::parser::Parsed;

/// Decoded tag state as published by a receiver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagReport {
    /// Tag address, `AA:BB:CC:DD:EE:FF`
    pub mac: String,
    /// Medicine label, trimmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine: Option<String>,
    /// Temperature (°C), two decimals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Charge (0–100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<u8>,
    /// Movement hold window open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving: Option<bool>,
    /// Broadcast sequence number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u16>,
}

impl TagReport {
    /// Report for a manufacturer frame
    ///
    /// The address comes from the frame itself, which stays correct when the
    /// radio advertises from a randomized address.
    pub fn from_frame(frame: &DecodedFrame) -> Self {
        Self {
            mac: frame.address.to_string(),
            medicine: Some(frame.label().to_owned()),
            temperature: frame.centidegrees.map(centi_to_celsius),
            battery: frame.battery,
            moving: frame.moving,
            sequence_number: frame.sequence,
        }
    }

    /// Report for a name-embedded frame seen from `address`
    pub fn from_name(address: DeviceIdentity, frame: &NameFrame) -> Self {
        Self {
            mac: address.to_string(),
            medicine: None,
            temperature: Some(centi_to_celsius(frame.centidegrees)),
            battery: Some(frame.battery),
            moving: None,
            sequence_number: Some(frame.sequence),
        }
    }

    /// Report for whatever a sighting from `address` carried
    pub fn from_parsed(address: DeviceIdentity, parsed: &Parsed) -> Self {
        match parsed {
            Parsed::Frame(frame) => Self::from_frame(frame),
            Parsed::Name(frame) => Self::from_name(address, frame),
        }
    }

    /// JSON for the broker
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn centi_to_celsius(centi: i16) -> f64 {
    f64::from(centi) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use medtag_core::FrameFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_report_leaves_out_unknown_fields() {
        let report = TagReport::from_name(
            DeviceIdentity::new([0x4C, 0x75, 0x25, 0xCB, 0x80, 0xA2]),
            &NameFrame { centidegrees: -500, battery: 87, sequence: 12 },
        );

        assert_eq!(
            report.to_json().unwrap(),
            r#"{"mac":"4C:75:25:CB:80:A2","temperature":-5.0,"battery":87,"sequence_number":12}"#
        );
    }

    #[test]
    fn frame_report_trims_label() {
        let frame = DecodedFrame {
            format: FrameFormat::Basic,
            company_id: 0xFFFF,
            address: DeviceIdentity::new([1, 2, 3, 4, 5, 6]),
            label: *b"PANADOL     ",
            centidegrees: None,
            battery: None,
            moving: None,
            sequence: None,
        };

        let report = TagReport::from_frame(&frame);
        assert_eq!(report.medicine.as_deref(), Some("PANADOL"));
        assert_eq!(report.mac, "01:02:03:04:05:06");
        assert_eq!(report.temperature, None);
    }
}
