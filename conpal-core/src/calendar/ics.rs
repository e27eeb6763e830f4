//! ICS generation for exported calendar entries.

use icalendar::{Calendar, Component, EventLike, Property};

use crate::calendar::entry::CalendarEntry;
use crate::error::ConpalResult;

/// Generate .ics content for an exported entry.
///
/// Times are emitted as venue-zone local times with a TZID parameter so the
/// entry stays correct for attendees whose devices roam across zones.
pub fn generate_ics(entry: &CalendarEntry, uid: &str) -> ConpalResult<String> {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(uid);
    ics_event.summary(&entry.title);

    // DTSTAMP - required by RFC 5545
    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    add_zoned_property(&mut ics_event, "DTSTART", entry);
    add_zoned_property(&mut ics_event, "DTEND", entry);

    if let Some(ref notes) = entry.notes {
        ics_event.description(notes);
    }

    if let Some(ref location) = entry.location {
        ics_event.location(location);
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    // Post-process to remove unnecessary bloat from the icalendar crate's output
    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with CONPAL (we post-process the output)
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:CONPAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add DTSTART/DTEND as venue-zone local time with a TZID parameter.
fn add_zoned_property(ics_event: &mut icalendar::Event, name: &str, entry: &CalendarEntry) {
    let instant = if name == "DTSTART" { entry.start } else { entry.end };
    let local = instant.with_timezone(&entry.zone).naive_local();

    let mut prop = Property::new(name, local.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", entry.zone.name());
    ics_event.append_property(prop);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_entry() -> CalendarEntry {
        CalendarEntry {
            title: "Opening Ceremony".to_string(),
            start: Utc.with_ymd_and_hms(2026, 8, 6, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 8, 6, 11, 0, 0).unwrap(),
            zone: chrono_tz::Europe::Berlin,
            location: Some("Main Stage".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_generate_ics_emits_venue_local_times() {
        let ics = generate_ics(&make_entry(), "abc@conpal").unwrap();

        // 10:00 UTC is 12:00 in Berlin during CEST
        assert!(
            ics.contains("DTSTART;TZID=Europe/Berlin:20260806T120000"),
            "DTSTART should be venue-local with TZID. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;TZID=Europe/Berlin:20260806T130000"),
            "DTEND should be venue-local with TZID. ICS:\n{}",
            ics
        );
        assert!(ics.contains("UID:abc@conpal"), "Missing UID. ICS:\n{}", ics);
        assert!(ics.contains("LOCATION:Main Stage"), "Missing location. ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_strips_bloat() {
        let ics = generate_ics(&make_entry(), "abc@conpal").unwrap();

        assert!(ics.contains("PRODID:CONPAL"), "PRODID should be replaced. ICS:\n{}", ics);
        assert!(
            !ics.contains("CALSCALE:GREGORIAN"),
            "Default CALSCALE should be dropped. ICS:\n{}",
            ics
        );
    }
}
