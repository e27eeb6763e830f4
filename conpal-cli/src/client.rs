//! HTTP client for the convention content API.
//!
//! The API serves one normalized snapshot of every collection; the client
//! maps its PascalCase payload into conpal's record types.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use url::Url;

use conpal_core::directory::{Announcement, Dealer, LinkFragment, MapEntry, MapRecord};
use conpal_core::event::{EventDay, EventRecord, EventRoom, EventTrack};
use conpal_core::store::Snapshot;

pub struct ContentClient {
    http: reqwest::Client,
    base: Url,
}

impl ContentClient {
    pub fn new(api_base: &str) -> Result<Self> {
        let base = Url::parse(api_base)
            .with_context(|| format!("Invalid content API url: \"{}\"", api_base))?;

        Ok(ContentClient {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// GET /Api/Sync
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let url = format!("{}/Api/Sync", self.base.as_str().trim_end_matches('/'));

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to reach the content API")?;

        if !resp.status().is_success() {
            anyhow::bail!("Content API returned {}", resp.status());
        }

        let payload: SyncPayload = resp.json().await.context("Malformed content payload")?;
        Ok(payload.into_snapshot())
    }
}

// Payload types matching the content API

#[derive(Deserialize)]
struct SyncPayload {
    #[serde(rename = "Events", default)]
    events: Vec<ApiEvent>,
    #[serde(rename = "EventConferenceDays", default)]
    days: Vec<ApiDay>,
    #[serde(rename = "EventConferenceRooms", default)]
    rooms: Vec<ApiRoom>,
    #[serde(rename = "EventConferenceTracks", default)]
    tracks: Vec<ApiTrack>,
    #[serde(rename = "Dealers", default)]
    dealers: Vec<ApiDealer>,
    #[serde(rename = "Announcements", default)]
    announcements: Vec<ApiAnnouncement>,
    #[serde(rename = "Maps", default)]
    maps: Vec<ApiMap>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiEvent {
    id: String,
    title: String,
    sub_title: Option<String>,
    #[serde(rename = "Abstract")]
    abstract_text: Option<String>,
    description: Option<String>,
    start_date_time_utc: Option<DateTime<Utc>>,
    end_date_time_utc: Option<DateTime<Utc>>,
    conference_room_id: Option<String>,
    conference_track_id: Option<String>,
    conference_day_id: Option<String>,
    banner_image_id: Option<String>,
    poster_image_id: Option<String>,
    glyph: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    last_change_date_time_utc: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiDay {
    id: String,
    name: String,
    date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiRoom {
    id: String,
    name: String,
    short_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiTrack {
    id: String,
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiDealer {
    id: String,
    display_name: Option<String>,
    attendee_nickname: String,
    short_description: Option<String>,
    artist_image_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiAnnouncement {
    id: String,
    title: String,
    content: String,
    area: Option<String>,
    valid_from_date_time_utc: DateTime<Utc>,
    valid_until_date_time_utc: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiMap {
    id: String,
    description: String,
    image_id: Option<String>,
    is_browseable: bool,
    #[serde(default)]
    entries: Vec<ApiMapEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiMapEntry {
    id: String,
    x: f64,
    y: f64,
    tap_radius: f64,
    #[serde(default)]
    links: Vec<ApiLink>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiLink {
    fragment_type: String,
    name: Option<String>,
    target: String,
}

impl SyncPayload {
    fn into_snapshot(self) -> Snapshot {
        Snapshot {
            events: self.events.into_iter().map(Into::into).collect(),
            days: self.days.into_iter().map(Into::into).collect(),
            rooms: self.rooms.into_iter().map(Into::into).collect(),
            tracks: self.tracks.into_iter().map(Into::into).collect(),
            dealers: self.dealers.into_iter().map(Into::into).collect(),
            announcements: self.announcements.into_iter().map(Into::into).collect(),
            maps: self.maps.into_iter().map(Into::into).collect(),
            fetched_at: Some(Utc::now()),
        }
    }
}

impl From<ApiEvent> for EventRecord {
    fn from(api: ApiEvent) -> Self {
        EventRecord {
            id: api.id,
            title: api.title,
            subtitle: api.sub_title,
            abstract_text: api.abstract_text,
            description: api.description,
            start: api.start_date_time_utc,
            end: api.end_date_time_utc,
            room_id: api.conference_room_id,
            track_id: api.conference_track_id,
            day_id: api.conference_day_id,
            banner_image_id: api.banner_image_id,
            poster_image_id: api.poster_image_id,
            glyph: api.glyph,
            tags: api.tags,
            last_change: api.last_change_date_time_utc,
        }
    }
}

impl From<ApiDay> for EventDay {
    fn from(api: ApiDay) -> Self {
        EventDay {
            id: api.id,
            name: api.name,
            date: api.date,
        }
    }
}

impl From<ApiRoom> for EventRoom {
    fn from(api: ApiRoom) -> Self {
        EventRoom {
            id: api.id,
            name: api.name,
            short_name: api.short_name,
        }
    }
}

impl From<ApiTrack> for EventTrack {
    fn from(api: ApiTrack) -> Self {
        EventTrack {
            id: api.id,
            name: api.name,
        }
    }
}

impl From<ApiDealer> for Dealer {
    fn from(api: ApiDealer) -> Self {
        Dealer {
            id: api.id,
            display_name: api.display_name,
            attendee_nickname: api.attendee_nickname,
            short_description: api.short_description,
            artist_image_id: api.artist_image_id,
        }
    }
}

impl From<ApiAnnouncement> for Announcement {
    fn from(api: ApiAnnouncement) -> Self {
        Announcement {
            id: api.id,
            title: api.title,
            content: api.content,
            area: api.area,
            valid_from: api.valid_from_date_time_utc,
            valid_until: api.valid_until_date_time_utc,
        }
    }
}

impl From<ApiMap> for MapRecord {
    fn from(api: ApiMap) -> Self {
        MapRecord {
            id: api.id,
            description: api.description,
            image_id: api.image_id,
            is_browseable: api.is_browseable,
            entries: api.entries.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ApiMapEntry> for MapEntry {
    fn from(api: ApiMapEntry) -> Self {
        MapEntry {
            id: api.id,
            x: api.x,
            y: api.y,
            tap_radius: api.tap_radius,
            links: api.links.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ApiLink> for LinkFragment {
    fn from(api: ApiLink) -> Self {
        match api.fragment_type.as_str() {
            "DealerDetail" => LinkFragment::DealerDetail { target: api.target },
            "WebExternal" => LinkFragment::WebExternal {
                name: api.name,
                target: api.target,
            },
            "MapEntry" => LinkFragment::MapEntry {
                name: api.name,
                target: api.target,
            },
            "EventConferenceRoom" => LinkFragment::EventConferenceRoom {
                name: api.name,
                target: api.target,
            },
            _ => LinkFragment::Unknown,
        }
    }
}
