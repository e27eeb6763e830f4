//! Temporal classification of events.
//!
//! All predicates are total: an event missing a start or end is excluded
//! (classifies as `false`, progress `None`) rather than raising.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::directory::Announcement;
use crate::event::EventRecord;

/// Minutes before the start in which an event counts as upcoming.
pub const UPCOMING_WINDOW_MINUTES: i64 = 30;

/// Progress value assigned to events that are over; anything above 1.0
/// renders as done.
pub const PASSED_PROGRESS: f64 = 1.1;

/// Progress value assigned when no meaningful position can be computed;
/// anything below 0.0 renders as not yet started.
pub const NOT_STARTED_PROGRESS: f64 = -1.0;

/// `now` lies strictly between start and end.
pub fn is_current(event: &EventRecord, now: DateTime<Utc>) -> bool {
    match (event.start, event.end) {
        (Some(start), Some(end)) => start < now && now < end,
        _ => false,
    }
}

/// The event starts on the same calendar day as `now` in the venue zone
/// and has not ended yet.
pub fn is_happening_today(event: &EventRecord, now: DateTime<Utc>, zone: Tz) -> bool {
    match (event.start, event.end) {
        (Some(start), Some(end)) => {
            start.with_timezone(&zone).date_naive() == now.with_timezone(&zone).date_naive()
                && now < end
        }
        _ => false,
    }
}

/// `now` falls in the 30-minute window immediately preceding the start.
pub fn is_upcoming_soon(event: &EventRecord, now: DateTime<Utc>) -> bool {
    match event.start {
        Some(start) => {
            let window_open = start - chrono::Duration::minutes(UPCOMING_WINDOW_MINUTES);
            window_open < now && now < start
        }
        None => false,
    }
}

/// The event is over.
pub fn has_passed(event: &EventRecord, now: DateTime<Utc>) -> bool {
    match event.end {
        Some(end) => now >= end,
        None => false,
    }
}

/// Normalized position of `now` within the event's span: < 0 not started,
/// [0, 1] in progress, > 1 passed.
///
/// Zero-duration events are treated as instantaneously done: the passed
/// sentinel once `now` reaches the start, not-started before. Returns
/// `None` when either bound is missing.
pub fn progress(event: &EventRecord, now: DateTime<Utc>) -> Option<f64> {
    let (start, end) = match (event.start, event.end) {
        (Some(start), Some(end)) => (start, end),
        _ => return None,
    };

    let total = (end - start).num_milliseconds();
    if total == 0 {
        return Some(if now >= start {
            PASSED_PROGRESS
        } else {
            NOT_STARTED_PROGRESS
        });
    }

    Some((now - start).num_milliseconds() as f64 / total as f64)
}

/// The announcement's validity window contains `now`.
pub fn is_active_announcement(announcement: &Announcement, now: DateTime<Utc>) -> bool {
    announcement.valid_from < now && now < announcement.valid_until
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn timed_event(start: DateTime<Utc>, end: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: "e".to_string(),
            title: "Event".to_string(),
            subtitle: None,
            abstract_text: None,
            description: None,
            start: Some(start),
            end: Some(end),
            room_id: None,
            track_id: None,
            day_id: None,
            banner_image_id: None,
            poster_image_id: None,
            glyph: None,
            tags: vec![],
            last_change: start,
        }
    }

    #[test]
    fn test_is_current_iff_strictly_between() {
        let start = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let end = start + Duration::hours(1);
        let event = timed_event(start, end);

        assert!(!is_current(&event, start), "start boundary is not current");
        assert!(!is_current(&event, end), "end boundary is not current");
        assert!(is_current(&event, start + Duration::minutes(1)));
        assert!(!is_current(&event, start - Duration::seconds(1)));
        assert!(!is_current(&event, end + Duration::seconds(1)));
    }

    #[test]
    fn test_progress_boundaries() {
        let start = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let end = start + Duration::hours(1);
        let event = timed_event(start, end);

        assert_eq!(progress(&event, start), Some(0.0));
        assert_eq!(progress(&event, end), Some(1.0));
        assert_eq!(progress(&event, start + Duration::minutes(30)), Some(0.5));
        assert!(progress(&event, start - Duration::minutes(10)).unwrap() < 0.0);
        assert!(progress(&event, end + Duration::minutes(10)).unwrap() > 1.0);
    }

    #[test]
    fn test_sixty_minute_event_at_half_time() {
        let start = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let event = timed_event(start, start + Duration::minutes(60));
        let at = start + Duration::minutes(30);

        assert_eq!(progress(&event, at), Some(0.5));
        assert!(is_current(&event, at));
    }

    #[test]
    fn test_zero_duration_is_instantaneously_done() {
        let start = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let event = timed_event(start, start);

        assert_eq!(progress(&event, start - Duration::seconds(1)), Some(NOT_STARTED_PROGRESS));
        assert_eq!(progress(&event, start), Some(PASSED_PROGRESS));
        assert!(!is_current(&event, start));
        assert!(has_passed(&event, start));
    }

    #[test]
    fn test_missing_bounds_excluded_everywhere() {
        let start = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let mut event = timed_event(start, start + Duration::hours(1));
        event.end = None;
        let now = start + Duration::minutes(10);

        assert!(!is_current(&event, now));
        assert!(!is_happening_today(&event, now, chrono_tz::Europe::Berlin));
        assert!(!has_passed(&event, now));
        assert_eq!(progress(&event, now), None);

        event.start = None;
        assert!(!is_upcoming_soon(&event, now));
    }

    #[test]
    fn test_upcoming_window() {
        let start = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let event = timed_event(start, start + Duration::hours(1));

        assert!(is_upcoming_soon(&event, start - Duration::minutes(29)));
        assert!(!is_upcoming_soon(&event, start - Duration::minutes(30)), "window boundary excluded");
        assert!(!is_upcoming_soon(&event, start), "started events are no longer upcoming");
        assert!(!is_upcoming_soon(&event, start - Duration::minutes(31)));
    }

    #[test]
    fn test_happening_today_uses_venue_zone() {
        let zone = chrono_tz::Europe::Berlin;
        // 23:30 UTC on the 5th is 01:30 on the 6th in Berlin (CEST)
        let start = Utc.with_ymd_and_hms(2026, 8, 5, 23, 30, 0).unwrap();
        let event = timed_event(start, start + Duration::hours(2));

        // 22:30 UTC on the 5th is still the 5th in UTC but the 6th in Berlin
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 22, 30, 0).unwrap();
        assert!(is_happening_today(&event, now, zone));

        // After the event ended it no longer counts, same day or not
        assert!(!is_happening_today(&event, start + Duration::hours(3), zone));
    }

    #[test]
    fn test_active_announcement_window() {
        let from = Utc.with_ymd_and_hms(2026, 8, 6, 8, 0, 0).unwrap();
        let announcement = Announcement {
            id: "a".to_string(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            area: None,
            valid_from: from,
            valid_until: from + Duration::hours(4),
        };

        assert!(is_active_announcement(&announcement, from + Duration::hours(1)));
        assert!(!is_active_announcement(&announcement, from - Duration::hours(1)));
        assert!(!is_active_announcement(&announcement, from + Duration::hours(5)));
    }
}
