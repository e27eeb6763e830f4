//! Non-schedule content records: dealers, announcements, maps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dealers' den / artist alley listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: String,
    pub display_name: Option<String>,
    pub attendee_nickname: String,
    pub short_description: Option<String>,
    pub artist_image_id: Option<String>,
}

impl Dealer {
    /// Display name with nickname fallback.
    pub fn full_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.attendee_nickname)
    }
}

/// A timed announcement; only shown while `valid_from < now < valid_until`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub area: Option<String>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

/// A venue map with tappable entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    pub id: String,
    pub description: String,
    pub image_id: Option<String>,
    pub is_browseable: bool,
    pub entries: Vec<MapEntry>,
}

/// A point of interest on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub tap_radius: f64,
    pub links: Vec<LinkFragment>,
}

/// A link attached to a map entry, dispatched on its declared fragment type.
///
/// Unrecognized fragment types deserialize to `Unknown` so a content update
/// introducing a new kind degrades instead of failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fragment_type")]
pub enum LinkFragment {
    DealerDetail { target: String },
    WebExternal { name: Option<String>, target: String },
    MapEntry { name: Option<String>, target: String },
    EventConferenceRoom { name: Option<String>, target: String },
    #[serde(other)]
    Unknown,
}
