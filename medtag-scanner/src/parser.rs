//! Advertisement parsing
//!
//! Host BLE stacks disagree on what they hand over. Raw HCI reports contain
//! the whole AD block; higher-level stacks (BlueZ, CoreBluetooth) give a
//! map of company id to manufacturer data with the id already stripped, and
//! a separate local name. [`Sighting`] covers both, and the parser accepts
//! manufacturer data with or without its leading company id.

use log::{debug, trace};
use medtag_core::{
    constants::COMPANY_ID,
    payload::{
        decode_name, decode_with_company,
        envelope::{AD_TYPE_COMPLETE_NAME, AD_TYPE_MANUFACTURER_DATA, AD_TYPE_SHORT_NAME},
        AdStructures, DecodedFrame, FrameFormat, NameFrame,
    },
    DeviceIdentity, PayloadError,
};

use crate::errors::{ScanResult, ScannerError};

/// What a scan saw from one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting<'a> {
    /// Address the advertisement came from
    pub address: DeviceIdentity,
    /// Advertised local name, complete or shortened
    pub local_name: Option<&'a str>,
    /// Manufacturer-specific data, with or without the company id
    pub manufacturer_data: Option<&'a [u8]>,
}

impl<'a> Sighting<'a> {
    /// Sighting from raw AD structures (advertisement or scan response)
    pub fn from_ad_structures(address: DeviceIdentity, raw: &'a [u8]) -> Self {
        let mut sighting = Self { address, local_name: None, manufacturer_data: None };
        for (ad_type, data) in AdStructures::new(raw) {
            match ad_type {
                AD_TYPE_COMPLETE_NAME | AD_TYPE_SHORT_NAME => {
                    sighting.local_name = core::str::from_utf8(data).ok();
                }
                AD_TYPE_MANUFACTURER_DATA => sighting.manufacturer_data = Some(data),
                _ => {}
            }
        }
        sighting
    }
}

/// Payload recovered from a sighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed {
    /// Structured manufacturer frame
    Frame(DecodedFrame),
    /// Name-embedded fallback
    Name(NameFrame),
}

/// Decode manufacturer data, with or without the leading company id
///
/// Stripped and unstripped lengths overlap (a stripped 24-byte frame is as
/// long as an unstripped 24-byte one), so the bytes are first read as given
/// and only re-read with our company id prepended if that fails.
pub fn parse_manufacturer_data(data: &[u8]) -> ScanResult<DecodedFrame> {
    parse_manufacturer_data_with_company(data, COMPANY_ID)
}

/// [`parse_manufacturer_data`] for tags configured with another company id
pub fn parse_manufacturer_data_with_company(data: &[u8], company_id: u16) -> ScanResult<DecodedFrame> {
    let as_given = decode_with_company(data, company_id);
    if as_given.is_ok() || FrameFormat::from_frame_len(data.len() + 2).is_none() {
        return as_given.map_err(ScannerError::from);
    }

    let mut full = Vec::with_capacity(data.len() + 2);
    full.extend_from_slice(&company_id.to_le_bytes());
    full.extend_from_slice(data);
    trace!("retrying {} bytes with company id {:#06x} prepended", data.len(), company_id);
    decode_with_company(&full, company_id).map_err(ScannerError::from)
}

/// Recover the tag payload from a sighting
///
/// Manufacturer data wins when present; the name is only consulted when
/// there is none, since a tag in the structured format still advertises the
/// plain device name.
pub fn parse_sighting(sighting: &Sighting<'_>) -> ScanResult<Parsed> {
    parse_sighting_with_company(sighting, COMPANY_ID)
}

/// [`parse_sighting`] for tags configured with another company id
pub fn parse_sighting_with_company(sighting: &Sighting<'_>, company_id: u16) -> ScanResult<Parsed> {
    if let Some(data) = sighting.manufacturer_data {
        return parse_manufacturer_data_with_company(data, company_id).map(Parsed::Frame);
    }

    match sighting.local_name.map(decode_name) {
        Some(Ok(frame)) => Ok(Parsed::Name(frame)),
        Some(Err(PayloadError::Malformed { reason })) => {
            debug!("{}: name not parsed: {}", sighting.address, reason);
            Err(ScannerError::NotATag)
        }
        Some(Err(err)) => Err(err.into()),
        None => Err(ScannerError::NotATag),
    }
}
