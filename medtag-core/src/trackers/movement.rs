//! Movement tracker
//!
//! Classifies the tag as moving, stationary or neither from the time since the
//! last acceleration spike:
//!
//! ```text
//! spike                2 s                                  30 s
//!   |---- Moving -------|------------- Idle ------------------|---- Stationary ---->
//! ```
//!
//! The Idle band is a real third state, not an error: the tag was handled a
//! moment ago and might be again. At boot the tag is Idle too, even though it
//! has never moved, so a freshly powered tag does not claim to have been
//! sitting still for 30 seconds. Only a real spike opens the hold window; a
//! quiet boot goes straight from Idle to Stationary.

use core::fmt;

use crate::{
    config::MovementConfig,
    constants::sensors::REST_MAGNITUDE_G,
    time::{elapsed, Cadence, Timestamp},
    traits::{SampleSource, Tracker},
};

/// Motion classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementState {
    /// Recently moved, but not within the hold window
    #[default]
    Idle,
    /// Spike within the hold window
    Moving,
    /// No spike for the stationary timeout
    Stationary,
}

impl MovementState {
    /// State for a pair of flags; moving wins if both are set
    pub const fn from_flags(moving: bool, stationary: bool) -> Self {
        match (moving, stationary) {
            (true, _) => Self::Moving,
            (false, true) => Self::Stationary,
            (false, false) => Self::Idle,
        }
    }

    /// Lowercase name for logs and reports
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving => "moving",
            Self::Stationary => "stationary",
        }
    }
}

impl fmt::Display for MovementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Moving/stationary flags derived from acceleration magnitude
#[derive(Debug, Clone)]
pub struct MovementTracker {
    config: MovementConfig,
    cadence: Cadence,
    started: Timestamp,
    last_movement: Option<Timestamp>,
    moving: bool,
    stationary: bool,
    magnitude: f32,
}

impl Default for MovementTracker {
    fn default() -> Self {
        Self::new(MovementConfig::default(), 0)
    }
}

impl MovementTracker {
    /// Idle tracker whose stationary timeout counts from `start`
    pub fn new(config: MovementConfig, start: Timestamp) -> Self {
        Self {
            cadence: Cadence::new(config.period_ms, start),
            config,
            started: start,
            last_movement: None,
            moving: false,
            stationary: false,
            magnitude: REST_MAGNITUDE_G,
        }
    }

    /// Spike within the hold window
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// No spike for the stationary timeout
    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    /// Latest acceleration magnitude (g)
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Tick of the last spike, `None` until the first one
    pub fn last_movement(&self) -> Option<Timestamp> {
        self.last_movement
    }

    /// Current classification
    pub fn state(&self) -> MovementState {
        MovementState::from_flags(self.moving, self.stationary)
    }

    /// Feed one magnitude taken at `now`; returns whether a flag flipped
    pub fn record(&mut self, now: Timestamp, magnitude: f32) -> bool {
        let was_moving = self.moving;
        let was_stationary = self.stationary;

        // NaN compares false and never counts as a spike
        self.magnitude = magnitude;
        let spike = magnitude > self.config.threshold_g;
        if spike {
            self.last_movement = Some(now);
        }

        // Quiet time counts from boot until the first spike, but only a real
        // spike opens the hold window
        let since = elapsed(now, self.last_movement.unwrap_or(self.started));
        // Without a spike `since` only grows; once stationary, only a spike
        // leaves, so a counter wrap cannot bring the tag back into the hold
        // window
        let settled = was_stationary && !spike;
        self.moving = !settled && self.last_movement.is_some() && since < self.config.moving_hold_ms;
        self.stationary = settled || since >= self.config.stationary_after_ms;

        let changed = self.moving != was_moving || self.stationary != was_stationary;
        if changed {
            log_debug!("movement {} ({} g)", self.state().name(), magnitude);
        }
        changed
    }
}

impl Tracker for MovementTracker {
    fn due(&self, now: Timestamp) -> bool {
        self.cadence.due(now)
    }

    fn prime<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) {
        self.magnitude = source.read_acceleration().magnitude();
        self.started = now;
        self.last_movement = None;
        self.moving = false;
        self.stationary = false;
        self.cadence.accept(now);
    }

    fn sample<S: SampleSource + ?Sized>(&mut self, now: Timestamp, source: &mut S) -> bool {
        if !self.cadence.poll(now) {
            return false;
        }
        let magnitude = source.read_acceleration().magnitude();
        self.record(now, magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Acceleration;

    const REST: f32 = 1.0;
    const SHAKE: f32 = 1.4;

    struct Imu(Acceleration);

    impl SampleSource for Imu {
        fn read_temperature(&mut self) -> f32 {
            25.0
        }

        fn read_voltage(&mut self) -> f32 {
            4.0
        }

        fn read_acceleration(&mut self) -> Acceleration {
            self.0
        }
    }

    #[test]
    fn boots_idle() {
        let tracker = MovementTracker::default();
        assert!(!tracker.is_moving());
        assert!(!tracker.is_stationary());
        assert_eq!(tracker.state(), MovementState::Idle);
    }

    #[test]
    fn spike_walks_through_all_three_states() {
        let mut tracker = MovementTracker::new(MovementConfig::default(), 0);

        assert!(tracker.record(1_000, SHAKE));
        assert_eq!(tracker.state(), MovementState::Moving);

        assert!(!tracker.record(2_999, REST));
        assert!(tracker.is_moving());

        assert!(tracker.record(3_000, REST));
        assert_eq!(tracker.state(), MovementState::Idle);

        assert!(!tracker.record(30_999, REST));
        assert_eq!(tracker.state(), MovementState::Idle);

        assert!(tracker.record(31_000, REST));
        assert_eq!(tracker.state(), MovementState::Stationary);
        assert!(!tracker.is_moving());
    }

    #[test]
    fn spike_on_the_boot_tick() {
        let mut tracker = MovementTracker::default();

        assert!(tracker.record(0, SHAKE));
        assert!(tracker.is_moving());
        assert!(!tracker.record(1_999, REST));
        assert!(tracker.record(2_000, REST));
        assert!(!tracker.record(29_999, REST));
        assert!(tracker.record(30_000, REST));
        assert!(tracker.is_stationary());
    }

    #[test]
    fn quiet_boot_becomes_stationary_without_moving() {
        let mut tracker = MovementTracker::default();

        assert!(!tracker.record(100, REST));
        assert!(!tracker.is_moving());
        assert!(tracker.record(30_000, REST));
        assert_eq!(tracker.state(), MovementState::Stationary);
    }

    #[test]
    fn magnitude_updates_without_change() {
        let mut tracker = MovementTracker::default();

        assert!(!tracker.record(100, 1.02));
        assert_eq!(tracker.magnitude(), 1.02);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut tracker = MovementTracker::default();
        assert!(!tracker.record(100, 1.05));
        assert!(tracker.record(200, 1.051));
    }

    #[test]
    fn repeated_spikes_extend_the_hold() {
        let mut tracker = MovementTracker::default();
        tracker.record(0, SHAKE);
        tracker.record(1_500, SHAKE);

        assert!(!tracker.record(3_000, REST));
        assert!(tracker.is_moving());
        assert!(tracker.record(3_500, REST));
        assert!(!tracker.is_moving());
    }

    #[test]
    fn stationary_breaks_on_spike() {
        let mut tracker = MovementTracker::default();
        tracker.record(30_000, REST);
        assert!(tracker.is_stationary());

        assert!(tracker.record(30_100, SHAKE));
        assert_eq!(tracker.state(), MovementState::Moving);
    }

    #[test]
    fn stays_stationary_across_counter_wrap() {
        let mut tracker = MovementTracker::default();
        tracker.record(40_000, REST);
        assert!(tracker.is_stationary());

        // A full counter cycle later the raw elapsed time looks tiny again
        assert!(!tracker.record(500, REST));
        assert_eq!(tracker.state(), MovementState::Stationary);
    }

    #[test]
    fn spike_then_counter_wrap_stays_stationary() {
        let mut tracker = MovementTracker::default();
        tracker.record(1_000, SHAKE);
        assert!(tracker.record(31_000, REST));
        assert!(tracker.is_stationary());

        // One full counter cycle after the spike: raw elapsed time is 500 ms
        assert!(!tracker.record(1_500, REST));
        assert!(!tracker.is_moving());
        assert_eq!(tracker.state(), MovementState::Stationary);

        assert!(!tracker.record(2_900, REST));
        assert_eq!(tracker.state(), MovementState::Stationary);

        assert!(tracker.record(3_000, SHAKE));
        assert_eq!(tracker.state(), MovementState::Moving);
        assert!(!tracker.is_stationary());
    }

    #[test]
    fn sampling_is_rate_limited() {
        let mut tracker = MovementTracker::new(MovementConfig::default(), 0);
        let mut imu = Imu(Acceleration::new(0.0, 1.2, 0.9));

        assert!(!tracker.sample(99, &mut imu));
        assert_eq!(tracker.magnitude(), REST_MAGNITUDE_G);

        assert!(tracker.sample(100, &mut imu));
        assert!(tracker.is_moving());
        assert!((tracker.magnitude() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn prime_starts_idle_and_resets_windows() {
        let mut tracker = MovementTracker::default();
        tracker.record(50_000, REST);
        assert!(tracker.is_stationary());

        tracker.prime(60_000, &mut Imu(Acceleration::new(0.0, 0.0, 1.0)));
        assert_eq!(tracker.state(), MovementState::Idle);
        assert_eq!(tracker.last_movement(), None);
        assert!(!tracker.due(60_099));
    }
}
