//! Scanner errors

use medtag_core::PayloadError;
use thiserror_no_std::Error;

/// Result type for scanner operations
pub type ScanResult<T> = Result<T, ScannerError>;

/// Why an advertisement produced no report
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerError {
    /// Advertisement has neither manufacturer data nor a tag name
    #[error("Not a MedTag advertisement")]
    NotATag,

    /// Manufacturer data or name looked like ours but did not parse
    #[error("Invalid tag payload: {0}")]
    Payload(PayloadError),
}

impl From<PayloadError> for ScannerError {
    fn from(err: PayloadError) -> Self {
        ScannerError::Payload(err)
    }
}
