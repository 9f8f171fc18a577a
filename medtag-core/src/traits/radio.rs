//! Radio Seam
//!
//! The BLE stack is a collaborator: the core decides what to advertise and
//! how often, the stack puts it on air. Reconfiguring is a
//! stop-reconfigure-start sequence with a short gap in advertising, see
//! [`crate::controller::apply`].

/// BLE advertising collaborator
///
/// Mirrors the handful of calls every peripheral stack exposes for legacy
/// advertising. Intervals are in 0.625 ms units.
pub trait Advertiser {
    /// Stack-specific failure
    type Error;

    /// Stop advertising
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Replace the advertisement packet (raw AD structures)
    fn set_advertisement_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Replace the scan response packet (raw AD structures)
    fn set_scan_response_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Set the advertising interval range
    fn set_interval(&mut self, min_units: u16, max_units: u16) -> Result<(), Self::Error>;

    /// Start advertising with the current configuration
    fn start(&mut self) -> Result<(), Self::Error>;
}
