//! Schedule record types.
//!
//! These records mirror the normalized collections served by the convention
//! content API. They are immutable snapshots once fetched; client-mutable
//! data (favorites, hidden flags, view stamps) lives in
//! [`crate::auxiliary::AuxiliaryState`] keyed by record id.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled program item.
///
/// `start`/`end` can be absent on records that are announced before they are
/// scheduled; such events are excluded from all temporal classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    /// Short teaser text, preferred over `description` for calendar notes.
    pub abstract_text: Option<String>,
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,

    // Dimension foreign keys (at most one each, all nullable)
    pub room_id: Option<String>,
    pub track_id: Option<String>,
    pub day_id: Option<String>,

    // Presentation references
    pub banner_image_id: Option<String>,
    pub poster_image_id: Option<String>,
    pub glyph: Option<String>,
    pub tags: Vec<String>,

    /// Upstream modification stamp, compared against view stamps to flag
    /// favorites that changed since last seen.
    pub last_change: DateTime<Utc>,
}

impl EventRecord {
    /// Scheduled length, when both bounds are known.
    pub fn duration(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// A convention day (lookup dimension).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDay {
    pub id: String,
    pub name: String,
    /// Calendar date in the venue zone.
    pub date: NaiveDate,
}

/// A room events take place in (lookup dimension).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRoom {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
}

impl EventRoom {
    /// Compact label for list rendering, falling back to the full name.
    pub fn display_tag(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

/// A program track (lookup dimension).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTrack {
    pub id: String,
    pub name: String,
}
