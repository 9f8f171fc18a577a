//! Error Types for Payload Encoding and Decoding
//!
//! ## Design Philosophy
//!
//! The tracking side of the core never fails: invalid readings are skipped,
//! out-of-range numbers are clamped and long labels are truncated. Errors only
//! exist at the byte boundary, where a caller hands us a buffer that is too
//! small or a scanner hands us bytes that are not one of our frames.
//!
//! 1. **Small Size**: Variants carry a few `usize`/`u8` fields at most.
//!
//! 2. **No Heap Allocation**: Context is inline, messages are `&'static str`.
//!
//! 3. **Copy Semantics**: Errors are `Copy` so they can be returned from
//!    the control loop without ownership juggling.
//!
//! ## Handling
//!
//! ```rust
//! use medtag_core::payload::decode_manufacturer_data;
//! use medtag_core::PayloadError;
//!
//! match decode_manufacturer_data(&[0xFF, 0xFF, 0x01]) {
//!     Ok(frame) => { let _ = frame.label(); }
//!     Err(PayloadError::Truncated { .. }) => {
//!         // Partial scan response, wait for the next one
//!     }
//!     Err(_) => {
//!         // Someone else's beacon
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for payload operations
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Payload errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    /// Destination buffer cannot hold the encoded bytes
    #[error("Buffer too small: need {required} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes the encoding needs
        required: usize,
        /// Bytes the caller provided
        available: usize,
    },

    /// Received bytes end before the smallest known frame does
    #[error("Frame truncated: need at least {required} bytes, got {actual}")]
    Truncated {
        /// Minimum length of a valid frame
        required: usize,
        /// Length actually received
        actual: usize,
    },

    /// Length matches no known frame version
    #[error("Unsupported frame length {0}")]
    UnsupportedLength(usize),

    /// Company identifier is not ours
    #[error("Unexpected company id 0x{0:04X}")]
    UnexpectedCompany(u16),

    /// Reserved bits or bytes were not zero, or text was not ASCII
    #[error("Malformed frame: {reason}")]
    Malformed {
        /// What was wrong with it
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for PayloadError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::BufferTooSmall { required, available } =>
                defmt::write!(fmt, "Need {} bytes, have {}", required, available),
            Self::Truncated { required, actual } =>
                defmt::write!(fmt, "Frame truncated: {} < {}", actual, required),
            Self::UnsupportedLength(len) =>
                defmt::write!(fmt, "Unsupported frame length {}", len),
            Self::UnexpectedCompany(id) =>
                defmt::write!(fmt, "Unexpected company id {=u16:#06x}", id),
            Self::Malformed { reason } =>
                defmt::write!(fmt, "Malformed frame: {}", reason),
        }
    }
}
