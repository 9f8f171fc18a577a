//! One-line status for the tag display and serial console

use core::fmt;

use crate::{payload::Snapshot, trackers::MovementState};

/// `MED:PANADOL T:36.55C B:87% SEQ:12 idle`
///
/// Formats straight into whatever writer the caller has, no buffer of its
/// own.
#[derive(Debug, Clone, Copy)]
pub struct StatusLine<'a> {
    snapshot: Snapshot<'a>,
    movement: MovementState,
}

impl<'a> StatusLine<'a> {
    /// Status for `snapshot` in `movement`
    pub fn new(snapshot: Snapshot<'a>, movement: MovementState) -> Self {
        Self { snapshot, movement }
    }
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MED:{} T:{:.2}C B:{}% SEQ:{} {}",
            self.snapshot.label,
            self.snapshot.temperature_c,
            self.snapshot.battery_percent,
            self.snapshot.sequence,
            self.movement
        )
    }
}
