//! Normalized record store.
//!
//! Flat, keyed collections of the content snapshot, preserving the API's
//! iteration order. The store is replaced wholesale on fetch; a version
//! counter lets derived structures (see [`crate::schedule::GroupingIndex`])
//! detect staleness without diffing.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::{Announcement, Dealer, MapRecord};
use crate::error::{ConpalError, ConpalResult};
use crate::event::{EventDay, EventRecord, EventRoom, EventTrack};

/// One fetched content snapshot, as persisted in the JSON cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub days: Vec<EventDay>,
    #[serde(default)]
    pub rooms: Vec<EventRoom>,
    #[serde(default)]
    pub tracks: Vec<EventTrack>,
    #[serde(default)]
    pub dealers: Vec<Dealer>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub maps: Vec<MapRecord>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// An event joined with its lookup dimensions.
///
/// Unknown foreign keys degrade to `None`; callers must null-check.
#[derive(Debug, Clone, Copy)]
pub struct EventDetails<'a> {
    pub event: &'a EventRecord,
    pub day: Option<&'a EventDay>,
    pub room: Option<&'a EventRoom>,
    pub track: Option<&'a EventTrack>,
}

/// Read-only snapshot store with id lookup indexes.
pub struct RecordStore {
    snapshot: Snapshot,
    version: u64,
    events_by_id: HashMap<String, usize>,
    days_by_id: HashMap<String, usize>,
    rooms_by_id: HashMap<String, usize>,
    tracks_by_id: HashMap<String, usize>,
    dealers_by_id: HashMap<String, usize>,
    maps_by_id: HashMap<String, usize>,
}

impl RecordStore {
    pub fn empty() -> Self {
        Self::with_version(Snapshot::default(), 0)
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::with_version(snapshot, 1)
    }

    fn with_version(snapshot: Snapshot, version: u64) -> Self {
        let mut store = RecordStore {
            snapshot,
            version,
            events_by_id: HashMap::new(),
            days_by_id: HashMap::new(),
            rooms_by_id: HashMap::new(),
            tracks_by_id: HashMap::new(),
            dealers_by_id: HashMap::new(),
            maps_by_id: HashMap::new(),
        };
        store.rebuild_indexes();
        store
    }

    /// Swap in a freshly fetched snapshot, invalidating derived structures.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.version += 1;
        self.rebuild_indexes();
    }

    fn rebuild_indexes(&mut self) {
        self.events_by_id = index_of(&self.snapshot.events, |e| &e.id);
        self.days_by_id = index_of(&self.snapshot.days, |d| &d.id);
        self.rooms_by_id = index_of(&self.snapshot.rooms, |r| &r.id);
        self.tracks_by_id = index_of(&self.snapshot.tracks, |t| &t.id);
        self.dealers_by_id = index_of(&self.snapshot.dealers, |d| &d.id);
        self.maps_by_id = index_of(&self.snapshot.maps, |m| &m.id);
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.fetched_at
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.snapshot.events
    }

    pub fn days(&self) -> &[EventDay] {
        &self.snapshot.days
    }

    pub fn rooms(&self) -> &[EventRoom] {
        &self.snapshot.rooms
    }

    pub fn tracks(&self) -> &[EventTrack] {
        &self.snapshot.tracks
    }

    pub fn dealers(&self) -> &[Dealer] {
        &self.snapshot.dealers
    }

    pub fn announcements(&self) -> &[Announcement] {
        &self.snapshot.announcements
    }

    pub fn maps(&self) -> &[MapRecord] {
        &self.snapshot.maps
    }

    pub fn event(&self, id: &str) -> Option<&EventRecord> {
        self.events_by_id.get(id).map(|&i| &self.snapshot.events[i])
    }

    pub fn day(&self, id: &str) -> Option<&EventDay> {
        self.days_by_id.get(id).map(|&i| &self.snapshot.days[i])
    }

    pub fn room(&self, id: &str) -> Option<&EventRoom> {
        self.rooms_by_id.get(id).map(|&i| &self.snapshot.rooms[i])
    }

    pub fn track(&self, id: &str) -> Option<&EventTrack> {
        self.tracks_by_id.get(id).map(|&i| &self.snapshot.tracks[i])
    }

    pub fn dealer(&self, id: &str) -> Option<&Dealer> {
        self.dealers_by_id.get(id).map(|&i| &self.snapshot.dealers[i])
    }

    pub fn map(&self, id: &str) -> Option<&MapRecord> {
        self.maps_by_id.get(id).map(|&i| &self.snapshot.maps[i])
    }

    /// Join an event with its day, room and track.
    pub fn event_with_details(&self, id: &str) -> Option<EventDetails<'_>> {
        let event = self.event(id)?;
        Some(EventDetails {
            event,
            day: event.day_id.as_deref().and_then(|id| self.day(id)),
            room: event.room_id.as_deref().and_then(|id| self.room(id)),
            track: event.track_id.as_deref().and_then(|id| self.track(id)),
        })
    }

    /// Load the cached snapshot; an absent cache yields an empty store.
    pub fn load(path: &Path) -> ConpalResult<Self> {
        if !path.exists() {
            return Ok(Self::empty());
        }

        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|e| ConpalError::Serialization(e.to_string()))?;

        Ok(Self::from_snapshot(snapshot))
    }

    /// Persist the snapshot atomically (write to a temp file, then rename).
    pub fn save(&self, path: &Path) -> ConpalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.snapshot)
            .map_err(|e| ConpalError::Serialization(e.to_string()))?;

        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, path)?;
        Ok(())
    }
}

fn index_of<T>(items: &[T], id: impl Fn(&T) -> &String) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (id(item).clone(), i))
        .collect()
}

/// Compose the content URL for an image record.
pub fn image_url(api_base: &str, image_id: &str) -> String {
    format!("{}/Api/Images/{}/Content", api_base.trim_end_matches('/'), image_id)
}
