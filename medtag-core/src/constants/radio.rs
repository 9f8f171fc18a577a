//! Radio Constants
//!
//! Advertising intervals and the identifiers that go on air.

/// Company identifier in the manufacturer-data block.
///
/// 0xFFFF is reserved by the Bluetooth SIG for internal and test use, which is
/// what an unregistered product is expected to send.
pub const COMPANY_ID: u16 = 0xFFFF;

/// Complete local name carried in the advertisement packet.
pub const DEVICE_NAME: &str = "MED_TAG";

/// Prefix of the name-embedded fallback format.
pub const NAME_FORMAT_PREFIX: &str = "MT";

/// AD flags: LE general discoverable, BR/EDR not supported.
pub const AD_FLAGS_GENERAL_DISCOVERABLE: u8 = 0x06;

// ===== ADVERTISING INTERVALS =====

/// Interval while the tag is moving (milliseconds).
pub const MOVING_INTERVAL_MS: u32 = 500;

/// Interval while the tag is neither moving nor stationary (milliseconds).
pub const IDLE_INTERVAL_MS: u32 = 1_000;

/// Interval once the tag has been still for a while (milliseconds).
pub const STATIONARY_INTERVAL_MS: u32 = 5_000;

/// Length of one advertising interval unit (microseconds).
pub const INTERVAL_UNIT_US: u32 = 625;

/// Smallest advertising interval the controller accepts (0.625 ms units, 20 ms).
pub const MIN_INTERVAL_UNITS: u16 = 0x0020;

/// Largest advertising interval the controller accepts (0.625 ms units, 10.24 s).
pub const MAX_INTERVAL_UNITS: u16 = 0x4000;
