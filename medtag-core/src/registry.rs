//! Medicine label registry
//!
//! Holds the name of the medicine the tag is attached to. The name is stored
//! in full (up to [`LABEL_CAPACITY`] bytes) for the display; fitting it into
//! the 12-byte wire field is the encoder's job.
//!
//! Edits come from the application shell (button press, provisioning) and
//! leave a pending flag the controller picks up on its next tick.

use heapless::String;

pub use crate::constants::payload::LABEL_CAPACITY;

/// Label shipped on a fresh tag and the first toggle endpoint
pub const PANADOL: &str = "PANADOL";

/// Second toggle endpoint
pub const AMOXICILLIN: &str = "AMOXICILLIN";

/// Bounded medicine name
pub type MedicineLabel = String<LABEL_CAPACITY>;

/// Mutable display label with edit tracking
#[derive(Debug, Clone)]
pub struct MedicineRegistry {
    label: MedicineLabel,
    edited: bool,
}

impl Default for MedicineRegistry {
    fn default() -> Self {
        Self::new(PANADOL)
    }
}

impl MedicineRegistry {
    /// Registry holding `name`, with no pending edit
    pub fn new(name: &str) -> Self {
        Self {
            label: bounded(name),
            edited: false,
        }
    }

    /// Current label
    pub fn get(&self) -> &str {
        self.label.as_str()
    }

    /// Replace the label
    ///
    /// Stored as given; only names longer than the storage capacity are cut,
    /// at the last whole character that fits.
    pub fn set(&mut self, name: &str) {
        self.label = bounded(name);
        self.edited = true;
        log_info!("medicine set to {}", self.label.as_str());
    }

    /// Flip between the two well-known medicines
    ///
    /// PANADOL becomes AMOXICILLIN; anything else, including an unknown
    /// label, becomes PANADOL.
    pub fn toggle(&mut self) {
        let next = if self.label.as_str() == PANADOL { AMOXICILLIN } else { PANADOL };
        self.set(next);
    }

    /// True when an edit is waiting to be broadcast
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Consume the pending-edit flag
    pub fn take_edited(&mut self) -> bool {
        core::mem::replace(&mut self.edited, false)
    }
}

fn bounded(name: &str) -> MedicineLabel {
    let mut end = name.len().min(LABEL_CAPACITY);
    while !name.is_char_boundary(end) {
        end -= 1;
    }

    let mut label = MedicineLabel::new();
    // Cannot fail: `end` is within capacity
    let _ = label.push_str(&name[..end]);
    label
}
