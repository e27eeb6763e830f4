//! Grouping index over the event collection.
//!
//! Partitions all events by room, track and day in one pass, preserving the
//! record store's iteration order within each group. The index is ephemeral
//! and rebuilt wholesale whenever the store version changes; collection
//! sizes (low thousands) make incremental updates not worth having.

use std::collections::HashMap;

use crate::event::EventRecord;
use crate::store::RecordStore;

pub struct GroupingIndex {
    version: u64,
    by_room: HashMap<String, Vec<usize>>,
    by_track: HashMap<String, Vec<usize>>,
    by_day: HashMap<String, Vec<usize>>,
}

impl GroupingIndex {
    pub fn build(store: &RecordStore) -> Self {
        let mut by_room: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_track: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_day: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, event) in store.events().iter().enumerate() {
            if let Some(room_id) = &event.room_id {
                by_room.entry(room_id.clone()).or_default().push(i);
            }
            if let Some(track_id) = &event.track_id {
                by_track.entry(track_id.clone()).or_default().push(i);
            }
            if let Some(day_id) = &event.day_id {
                by_day.entry(day_id.clone()).or_default().push(i);
            }
        }

        GroupingIndex {
            version: store.version(),
            by_room,
            by_track,
            by_day,
        }
    }

    /// Whether this index was built from the store's current snapshot.
    pub fn is_fresh(&self, store: &RecordStore) -> bool {
        self.version == store.version()
    }

    pub fn events_by_room<'a>(&self, store: &'a RecordStore, id: &str) -> Vec<&'a EventRecord> {
        self.resolve(store, self.by_room.get(id))
    }

    pub fn events_by_track<'a>(&self, store: &'a RecordStore, id: &str) -> Vec<&'a EventRecord> {
        self.resolve(store, self.by_track.get(id))
    }

    pub fn events_by_day<'a>(&self, store: &'a RecordStore, id: &str) -> Vec<&'a EventRecord> {
        self.resolve(store, self.by_day.get(id))
    }

    pub fn room_event_count(&self, id: &str) -> usize {
        self.by_room.get(id).map_or(0, Vec::len)
    }

    pub fn track_event_count(&self, id: &str) -> usize {
        self.by_track.get(id).map_or(0, Vec::len)
    }

    pub fn day_event_count(&self, id: &str) -> usize {
        self.by_day.get(id).map_or(0, Vec::len)
    }

    fn resolve<'a>(
        &self,
        store: &'a RecordStore,
        indices: Option<&Vec<usize>>,
    ) -> Vec<&'a EventRecord> {
        // Indices from a stale build would point into a replaced collection
        debug_assert!(self.is_fresh(store), "grouping index is stale");

        let events = store.events();
        indices
            .map(|list| list.iter().map(|&i| &events[i]).collect())
            .unwrap_or_default()
    }
}

/// Recompute-if-changed cache around [`GroupingIndex`], keyed on the store
/// version.
#[derive(Default)]
pub struct IndexCache {
    index: Option<GroupingIndex>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, store: &RecordStore) -> &GroupingIndex {
        let stale = match &self.index {
            Some(index) => !index.is_fresh(store),
            None => true,
        };
        if stale {
            self.index = Some(GroupingIndex::build(store));
        }
        self.index.as_ref().expect("index was just built")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Snapshot;
    use chrono::{TimeZone, Utc};

    fn make_event(id: &str, room: Option<&str>, day: Option<&str>) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: format!("Event {}", id),
            subtitle: None,
            abstract_text: None,
            description: None,
            start: Some(Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2026, 8, 6, 13, 0, 0).unwrap()),
            room_id: room.map(String::from),
            track_id: None,
            day_id: day.map(String::from),
            banner_image_id: None,
            poster_image_id: None,
            glyph: None,
            tags: vec![],
            last_change: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        }
    }

    fn make_store(events: Vec<EventRecord>) -> RecordStore {
        RecordStore::from_snapshot(Snapshot {
            events,
            ..Default::default()
        })
    }

    #[test]
    fn test_each_event_appears_exactly_once_per_dimension() {
        let store = make_store(vec![
            make_event("a", Some("r1"), Some("d1")),
            make_event("b", Some("r1"), Some("d2")),
            make_event("c", Some("r2"), None),
        ]);
        let index = GroupingIndex::build(&store);

        let r1 = index.events_by_room(&store, "r1");
        assert_eq!(r1.iter().filter(|e| e.id == "a").count(), 1);
        assert_eq!(r1.len(), 2);
        // Iteration order preserved within the group
        assert_eq!(r1[0].id, "a");
        assert_eq!(r1[1].id, "b");

        assert_eq!(index.events_by_room(&store, "r2").len(), 1);
        assert_eq!(index.events_by_day(&store, "d1").len(), 1);

        // Null foreign keys do not appear in the dimension at all
        assert_eq!(index.day_event_count("c"), 0);
    }

    #[test]
    fn test_unknown_id_yields_empty() {
        let store = make_store(vec![make_event("a", Some("r1"), None)]);
        let index = GroupingIndex::build(&store);

        assert!(index.events_by_room(&store, "nope").is_empty());
        assert!(index.events_by_track(&store, "t1").is_empty());
    }

    #[test]
    fn test_no_stale_entries_after_replacement() {
        let mut store = make_store(vec![make_event("a", Some("r1"), None)]);
        let mut cache = IndexCache::new();
        assert_eq!(cache.get(&store).room_event_count("r1"), 1);

        // Removing the record must drop its group entry on rebuild
        store.replace(Snapshot::default());
        let index = cache.get(&store);
        assert!(index.is_fresh(&store));
        assert_eq!(index.room_event_count("r1"), 0);
    }
}
