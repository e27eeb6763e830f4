//! Time source with a debug time-travel offset.
//!
//! All derivation functions take an explicit `now`; this module is the one
//! place that produces it. The offset is persisted with the client state so
//! consecutive CLI invocations observe the same simulated clock.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Persisted time-travel settings: a millisecond offset and an enable flag.
///
/// Keeping `offset_ms` while disabled lets the user toggle travel off and
/// back on without losing the configured delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeTravel {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub offset_ms: i64,
}

impl TimeTravel {
    pub fn offset(&self) -> Duration {
        Duration::milliseconds(self.offset_ms)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn travel_forward(&mut self, amount: Duration) {
        self.offset_ms += amount.num_milliseconds();
        self.enabled = true;
    }

    pub fn travel_backward(&mut self, amount: Duration) {
        self.offset_ms -= amount.num_milliseconds();
        self.enabled = true;
    }

    /// Aim the simulated clock at `target`, measured from the real clock.
    pub fn travel_to(&mut self, target: DateTime<Utc>) {
        self.offset_ms = (target - Utc::now()).num_milliseconds();
        self.enabled = true;
    }

    pub fn reset(&mut self) {
        self.offset_ms = 0;
        self.enabled = false;
    }
}

/// Produces the effective "now" for schedule derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    travel: TimeTravel,
}

impl Clock {
    pub fn new(travel: TimeTravel) -> Self {
        Clock { travel }
    }

    /// The real wall clock, ignoring any configured travel.
    pub fn real() -> DateTime<Utc> {
        Utc::now()
    }

    pub fn is_travelling(&self) -> bool {
        self.travel.enabled && self.travel.offset_ms != 0
    }

    pub fn now(&self) -> DateTime<Utc> {
        if self.travel.enabled {
            Utc::now() + self.travel.offset()
        } else {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_accumulates_and_resets() {
        let mut travel = TimeTravel::default();
        travel.travel_forward(Duration::hours(1));
        travel.travel_forward(Duration::minutes(30));
        assert!(travel.enabled);
        assert_eq!(travel.offset(), Duration::minutes(90));

        travel.travel_backward(Duration::minutes(90));
        assert_eq!(travel.offset_ms, 0);

        travel.travel_forward(Duration::hours(2));
        travel.reset();
        assert_eq!(travel, TimeTravel::default());
    }

    #[test]
    fn test_disabled_clock_tracks_real_time() {
        let clock = Clock::new(TimeTravel {
            enabled: false,
            offset_ms: 3_600_000,
        });
        assert!(!clock.is_travelling());

        let skew = clock.now() - Utc::now();
        assert!(skew.num_seconds().abs() < 5);
    }

    #[test]
    fn test_enabled_clock_applies_offset() {
        let clock = Clock::new(TimeTravel {
            enabled: true,
            offset_ms: 3_600_000,
        });
        assert!(clock.is_travelling());

        let skew = clock.now() - Utc::now();
        assert!((skew - Duration::hours(1)).num_seconds().abs() < 5);
    }
}
