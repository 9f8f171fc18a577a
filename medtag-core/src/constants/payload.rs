//! Wire-Format Layout
//!
//! Offsets and sizes of the manufacturer-data frame. The full layout:
//!
//! ```text
//! 0      2                8                        20     22  23  24     26
//! ├──────┼────────────────┼────────────────────────┼──────┼───┼───┼──────┤
//! │ CID  │ device address │ medicine label (ASCII) │ temp │ B │ M │ seq  │
//! │ (LE) │                │ space padded           │ (BE) │   │   │ (BE) │
//! └──────┴────────────────┴────────────────────────┴──────┴───┴───┴──────┘
//! ```
//!
//! Older frame versions end early at 20, 22, 23 or 24 bytes.

/// Company identifier field.
pub const COMPANY_OFFSET: usize = 0;
/// Device address field.
pub const ADDRESS_OFFSET: usize = 2;
/// Medicine label field.
pub const LABEL_OFFSET: usize = 8;
/// Temperature field.
pub const TEMPERATURE_OFFSET: usize = 20;
/// Battery field.
pub const BATTERY_OFFSET: usize = 22;
/// Movement flags field.
pub const MOVEMENT_OFFSET: usize = 23;
/// Sequence number field.
pub const SEQUENCE_OFFSET: usize = 24;

/// Bytes in a device address.
pub const ADDRESS_LEN: usize = 6;

/// Bytes the label occupies on the wire.
pub const LABEL_LEN: usize = 12;

/// Length of the largest frame version.
pub const FRAME_MAX_LEN: usize = 26;

/// Movement flag: tag is moving.
pub const FLAG_MOVING: u8 = 0x01;

/// Maximum length of a legacy advertising data block.
pub const AD_MAX_LEN: usize = 31;

/// Storage capacity of a medicine label (bytes).
///
/// Much longer than the wire field so the display can show the full name.
pub const LABEL_CAPACITY: usize = 32;
