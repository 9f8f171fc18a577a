//! Host-side decoding of MedTag advertisements
//!
//! Receivers (gateway boards, laptops) see tag advertisements through their
//! own BLE stack. This crate turns what they see into [`TagReport`]s ready to
//! publish, and drops the repeats a tag sends between broadcasts.
//!
//! ```rust
//! use medtag_core::DeviceIdentity;
//! use medtag_scanner::{Scanner, Sighting};
//!
//! let mut scanner = Scanner::new();
//! let sighting = Sighting {
//!     address: DeviceIdentity::new([0x4C, 0x75, 0x25, 0xCB, 0x80, 0xA2]),
//!     local_name: Some("MT3655_87_12"),
//!     manufacturer_data: None,
//! };
//!
//! let report = scanner.observe(&sighting).unwrap().unwrap();
//! assert_eq!(report.battery, Some(87));
//!
//! // Same broadcast heard again
//! assert_eq!(scanner.observe(&sighting), Ok(None));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod filter;
pub mod parser;
pub mod report;

pub use errors::{ScanResult, ScannerError};
pub use filter::{ReportFilter, DEFAULT_TRACKED_TAGS};
pub use parser::{
    parse_manufacturer_data, parse_manufacturer_data_with_company, parse_sighting,
    parse_sighting_with_company, Parsed, Sighting,
};
pub use report::TagReport;

use medtag_core::constants::COMPANY_ID;

/// Parser plus duplicate filter
#[derive(Debug)]
pub struct Scanner {
    company_id: u16,
    filter: ReportFilter,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::with_company(COMPANY_ID)
    }
}

impl Scanner {
    /// Scanner for tags using the default company id
    pub fn new() -> Self {
        Self::default()
    }

    /// Scanner for tags configured with `company_id`
    pub fn with_company(company_id: u16) -> Self {
        Self { company_id, filter: ReportFilter::new() }
    }

    /// Replace the duplicate filter, e.g. one with a different capacity
    pub fn with_filter(mut self, filter: ReportFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Report for a new broadcast, `None` for a repeat
    ///
    /// Sightings that are not tag advertisements are errors so the caller
    /// can count them; most callers just skip them.
    pub fn observe(&mut self, sighting: &Sighting<'_>) -> ScanResult<Option<TagReport>> {
        let parsed = parse_sighting_with_company(sighting, self.company_id)?;
        let report = TagReport::from_parsed(sighting.address, &parsed);
        if self.filter.accept(&report) {
            log::debug!("{}: sequence {:?}", report.mac, report.sequence_number);
            Ok(Some(report))
        } else {
            Ok(None)
        }
    }

    /// Company id frames must carry
    pub fn company_id(&self) -> u16 {
        self.company_id
    }

    /// Duplicate filter state
    pub fn filter(&self) -> &ReportFilter {
        &self.filter
    }
}
