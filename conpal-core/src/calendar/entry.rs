//! Host-neutral calendar entry assembled from a schedule event.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::event::{EventRecord, EventRoom};

/// What gets handed to a [`crate::calendar::CalendarHost`]: the event's
/// times anchored to the venue zone, the room as location, and the teaser
/// text as notes.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub zone: Tz,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CalendarEntry {
    /// Build an entry for an event; `None` when either bound is missing
    /// (unscheduled events cannot be exported).
    pub fn for_event(event: &EventRecord, room: Option<&EventRoom>, zone: Tz) -> Option<Self> {
        let (start, end) = match (event.start, event.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return None,
        };

        let notes = event
            .abstract_text
            .clone()
            .or_else(|| event.description.clone());

        Some(CalendarEntry {
            title: event.title.clone(),
            start,
            end,
            zone,
            location: room.map(|r| r.name.clone()),
            notes,
        })
    }
}
