//! Advertising data envelope
//!
//! A legacy advertisement or scan response is at most 31 bytes of AD
//! structures, each `[length][type][data...]` where `length` counts the type
//! byte and the data. [`AdvertisingData`] builds such a block and refuses to
//! overflow it; [`AdStructures`] walks one received from the air.

use heapless::Vec;

use crate::{
    constants::payload::AD_MAX_LEN,
    errors::{PayloadError, PayloadResult},
};

/// AD type: flags
pub const AD_TYPE_FLAGS: u8 = 0x01;
/// AD type: shortened local name
pub const AD_TYPE_SHORT_NAME: u8 = 0x08;
/// AD type: complete local name
pub const AD_TYPE_COMPLETE_NAME: u8 = 0x09;
/// AD type: manufacturer specific data
pub const AD_TYPE_MANUFACTURER_DATA: u8 = 0xFF;

/// One advertisement or scan response packet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdvertisingData {
    bytes: Vec<u8, AD_MAX_LEN>,
}

impl AdvertisingData {
    /// Empty packet
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append one AD structure
    ///
    /// Leaves the packet untouched if the structure does not fit.
    pub fn push(&mut self, ad_type: u8, data: &[u8]) -> PayloadResult<()> {
        let required = self.bytes.len() + 2 + data.len();
        if required > AD_MAX_LEN {
            return Err(PayloadError::BufferTooSmall { required, available: AD_MAX_LEN });
        }

        // Length fits in a byte: data is at most 29 bytes here
        let _ = self.bytes.push((data.len() + 1) as u8);
        let _ = self.bytes.push(ad_type);
        let _ = self.bytes.extend_from_slice(data);
        Ok(())
    }

    /// Append the discoverability flags
    pub fn flags(&mut self, flags: u8) -> PayloadResult<()> {
        self.push(AD_TYPE_FLAGS, &[flags])
    }

    /// Append the complete local name
    pub fn complete_name(&mut self, name: &str) -> PayloadResult<()> {
        self.push(AD_TYPE_COMPLETE_NAME, name.as_bytes())
    }

    /// Append a manufacturer-data block; `data` starts with the company id
    pub fn manufacturer_data(&mut self, data: &[u8]) -> PayloadResult<()> {
        self.push(AD_TYPE_MANUFACTURER_DATA, data)
    }

    /// Raw bytes as sent on air
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes used
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for an empty packet
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Walk the structures in this packet
    pub fn structures(&self) -> AdStructures<'_> {
        AdStructures::new(&self.bytes)
    }
}

/// What goes into the advertisement and what into the scan response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packets {
    /// Sent unsolicited on every advertising event
    pub advertisement: AdvertisingData,
    /// Sent to active scanners on request
    pub scan_response: AdvertisingData,
}

/// Iterator over `(ad_type, data)` in a raw AD block
///
/// Stops at the first zero length (early termination padding) or at a
/// structure that claims to run past the end of the block.
#[derive(Debug, Clone)]
pub struct AdStructures<'a> {
    rest: &'a [u8],
}

impl<'a> AdStructures<'a> {
    /// Walk `raw`
    pub fn new(raw: &'a [u8]) -> Self {
        Self { rest: raw }
    }

    /// Data of the first structure of `ad_type`
    pub fn find(mut self, ad_type: u8) -> Option<&'a [u8]> {
        self.find_map(|(ty, data)| (ty == ad_type).then_some(data))
    }
}

impl<'a> Iterator for AdStructures<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.rest.split_first()?;
        let len = len as usize;
        if len == 0 || len > tail.len() {
            self.rest = &[];
            return None;
        }

        let (structure, rest) = tail.split_at(len);
        self.rest = rest;
        Some((structure[0], &structure[1..]))
    }
}
