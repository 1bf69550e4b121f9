//! Daily service window of the simulated line.
//!
//! The line opens at 05:30 and runs past midnight until 01:15 the
//! following day. Departures from 00:45 onwards are the last ones of the
//! service day. Both 05:30 and 01:15 are inside the window.

use super::time::ClockTime;

/// Service status at a given time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStatus {
    /// The line is running.
    pub in_service: bool,

    /// The upcoming departure is within the final 30 minutes before closing.
    pub is_last: bool,
}

/// Opening time (inclusive), minutes after midnight.
const OPENS_AT: u32 = 5 * 60 + 30;

/// Closing time the following day (inclusive), minutes after midnight.
const CLOSES_AT: u32 = 60 + 15;

/// Start of the last-departures period (inclusive), minutes after midnight.
const LAST_FROM: u32 = 45;

/// Classify a time of day against the service window.
///
/// ```
/// use metro_server::domain::{ClockTime, classify};
///
/// let status = classify(ClockTime::from_hm(0, 50).unwrap());
/// assert!(status.in_service);
/// assert!(status.is_last);
///
/// let status = classify(ClockTime::from_hm(3, 0).unwrap());
/// assert!(!status.in_service);
/// ```
pub fn classify(now: ClockTime) -> ServiceStatus {
    let mins = now.minutes_since_midnight();

    // [05:30, 24:00) or [00:00, 01:15]
    let in_service = mins >= OPENS_AT || mins <= CLOSES_AT;

    // [00:45, 01:15]
    let is_last = (LAST_FROM..=CLOSES_AT).contains(&mins);

    ServiceStatus {
        in_service,
        is_last,
    }
}

/// Classify from raw hour and minute.
///
/// Returns `None` for an hour outside 0-23 or a minute outside 0-59.
pub fn classify_hm(hour: u32, minute: u32) -> Option<ServiceStatus> {
    ClockTime::from_hm(hour, minute).map(classify)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(h: u32, m: u32) -> ServiceStatus {
        classify_hm(h, m).unwrap()
    }

    #[test]
    fn opening_boundary_is_inclusive() {
        assert!(!status(5, 29).in_service);
        assert!(status(5, 30).in_service);
    }

    #[test]
    fn closing_boundary_is_inclusive() {
        assert!(status(1, 15).in_service);
        assert!(!status(1, 16).in_service);
    }

    #[test]
    fn daytime_in_service_not_last() {
        let s = status(15, 0);
        assert!(s.in_service);
        assert!(!s.is_last);

        let s = status(23, 59);
        assert!(s.in_service);
        assert!(!s.is_last);
    }

    #[test]
    fn midnight_in_service() {
        let s = status(0, 0);
        assert!(s.in_service);
        assert!(!s.is_last);
    }

    #[test]
    fn last_period_boundaries() {
        assert!(!status(0, 44).is_last);
        assert!(status(0, 45).is_last);
        assert!(status(0, 59).is_last);
        assert!(status(1, 0).is_last);
        assert!(status(1, 15).is_last);
        assert!(!status(1, 16).is_last);
    }

    #[test]
    fn night_closure() {
        for (h, m) in [(1, 16), (2, 0), (3, 30), (4, 59), (5, 0), (5, 29)] {
            let s = status(h, m);
            assert!(!s.in_service, "{h:02}:{m:02} should be closed");
            assert!(!s.is_last, "{h:02}:{m:02} should not be last");
        }
    }

    #[test]
    fn out_of_range_input() {
        assert!(classify_hm(24, 0).is_none());
        assert!(classify_hm(12, 60).is_none());
    }

    #[test]
    fn last_implies_in_service() {
        for mins in 0..24 * 60 {
            let s = status(mins / 60, mins % 60);
            if s.is_last {
                assert!(s.in_service);
            }
        }
    }
}
