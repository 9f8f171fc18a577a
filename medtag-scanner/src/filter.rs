//! Duplicate suppression
//!
//! A tag repeats one packet every advertising interval until something
//! changes, so a receiver sees each broadcast many times. The sequence number
//! only moves on a new broadcast: keeping the last one per tag is enough to
//! forward each broadcast once.
//!
//! Tags using random addresses show up under a new address every few minutes,
//! so the table is bounded; when full, the tag heard from least recently is
//! forgotten.

use std::collections::HashMap;

use log::trace;

use crate::report::TagReport;

/// Tags remembered by [`ReportFilter::new`]
pub const DEFAULT_TRACKED_TAGS: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Seen {
    sequence: u16,
    heard: u64,
}

/// Drops reports whose sequence number was already seen for that tag
#[derive(Debug)]
pub struct ReportFilter {
    last_sequence: HashMap<String, Seen>,
    capacity: usize,
    clock: u64,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TRACKED_TAGS)
    }
}

impl ReportFilter {
    /// Empty filter remembering up to [`DEFAULT_TRACKED_TAGS`] tags
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty filter remembering up to `capacity` tags (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { last_sequence: HashMap::with_capacity(capacity), capacity, clock: 0 }
    }

    /// True if `report` is new and should be forwarded
    ///
    /// Reports without a sequence number (older frame versions) cannot be
    /// deduplicated and always pass. Any change of sequence counts as new,
    /// so a tag that rebooted back to 0 is picked up immediately.
    pub fn accept(&mut self, report: &TagReport) -> bool {
        let Some(sequence) = report.sequence_number else {
            return true;
        };
        self.clock += 1;
        let heard = self.clock;

        if let Some(seen) = self.last_sequence.get_mut(&report.mac) {
            seen.heard = heard;
            if seen.sequence == sequence {
                trace!("{}: repeat of sequence {}", report.mac, sequence);
                return false;
            }
            seen.sequence = sequence;
            return true;
        }

        if self.last_sequence.len() >= self.capacity {
            self.evict_oldest();
        }
        self.last_sequence.insert(report.mac.clone(), Seen { sequence, heard });
        true
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .last_sequence
            .iter()
            .min_by_key(|(_, seen)| seen.heard)
            .map(|(mac, _)| mac.clone());
        if let Some(mac) = oldest {
            trace!("{}: forgotten, filter full", mac);
            self.last_sequence.remove(&mac);
        }
    }

    /// Last sequence number seen from `mac`
    pub fn last_sequence(&self, mac: &str) -> Option<u16> {
        self.last_sequence.get(mac).map(|seen| seen.sequence)
    }

    /// Tags currently remembered
    pub fn len(&self) -> usize {
        self.last_sequence.len()
    }

    /// True when no tag is remembered
    pub fn is_empty(&self) -> bool {
        self.last_sequence.is_empty()
    }

    /// Most tags remembered at once
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget every tag
    pub fn clear(&mut self) {
        self.last_sequence.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(mac: &str, sequence: Option<u16>) -> TagReport {
        TagReport {
            mac: mac.to_owned(),
            medicine: None,
            temperature: None,
            battery: None,
            moving: None,
            sequence_number: sequence,
        }
    }

    #[test]
    fn drops_repeats_per_tag() {
        let mut filter = ReportFilter::new();

        assert!(filter.accept(&report("A", Some(5))));
        assert!(!filter.accept(&report("A", Some(5))));
        assert!(filter.accept(&report("B", Some(5))));
        assert!(filter.accept(&report("A", Some(6))));
        assert_eq!(filter.last_sequence("A"), Some(6));
    }

    #[test]
    fn wrap_and_reboot_are_new() {
        let mut filter = ReportFilter::new();
        filter.accept(&report("A", Some(65_535)));
        assert!(filter.accept(&report("A", Some(0))));
    }

    #[test]
    fn full_table_forgets_least_recently_heard() {
        let mut filter = ReportFilter::with_capacity(2);
        filter.accept(&report("A", Some(1)));
        filter.accept(&report("B", Some(1)));
        // A heard again, so B is now the oldest
        assert!(!filter.accept(&report("A", Some(1))));

        assert!(filter.accept(&report("C", Some(1))));
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.last_sequence("B"), None);
        assert_eq!(filter.last_sequence("A"), Some(1));
        assert_eq!(filter.last_sequence("C"), Some(1));

        // Forgotten tags come back as new
        assert!(filter.accept(&report("B", Some(1))));
        assert_eq!(filter.last_sequence("A"), None);
    }

    #[test]
    fn default_capacity_is_bounded() {
        let mut filter = ReportFilter::new();
        assert_eq!(filter.capacity(), DEFAULT_TRACKED_TAGS);

        for i in 0..DEFAULT_TRACKED_TAGS + 10 {
            filter.accept(&report(&format!("{:06X}", i), Some(0)));
        }
        assert_eq!(filter.len(), DEFAULT_TRACKED_TAGS);
        assert_eq!(ReportFilter::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn unsequenced_reports_always_pass() {
        let mut filter = ReportFilter::new();
        assert!(filter.accept(&report("A", None)));
        assert!(filter.accept(&report("A", None)));

        filter.clear();
        assert_eq!(filter.last_sequence("A"), None);
    }
}
