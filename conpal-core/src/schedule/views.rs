//! View assemblers: filtered, grouped and annotated event lists.
//!
//! Every assembler excludes hidden events and returns an empty list for
//! empty input; consumers treat empty as "nothing to show", never an error.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::auxiliary::AuxiliaryState;
use crate::directory::Announcement;
use crate::event::EventRecord;
use crate::schedule::annotate::EventInstance;
use crate::schedule::filters;
use crate::schedule::groups::GroupingIndex;
use crate::store::RecordStore;

/// Events running right now, sorted ascending by progress: events that just
/// started list first, events about to end list last. The sort is stable,
/// so ties keep the store's order.
pub fn current_events<'a>(
    store: &'a RecordStore,
    aux: &AuxiliaryState,
    now: DateTime<Utc>,
) -> Vec<EventInstance<'a>> {
    let mut list: Vec<EventInstance<'a>> = store
        .events()
        .iter()
        .filter(|event| filters::is_current(event, now))
        .filter(|event| !aux.is_event_hidden(&event.id))
        .map(|event| EventInstance::for_any(event, now))
        .collect();

    list.sort_by(|a, b| a.progress.total_cmp(&b.progress));
    list
}

/// The user's favorites still ahead today (venue zone), in schedule order.
pub fn today_schedule<'a>(
    store: &'a RecordStore,
    aux: &AuxiliaryState,
    now: DateTime<Utc>,
    zone: Tz,
) -> Vec<EventInstance<'a>> {
    store
        .events()
        .iter()
        .filter(|event| aux.is_event_favorite(&event.id))
        .filter(|event| filters::is_happening_today(event, now, zone))
        .filter(|event| !aux.is_event_hidden(&event.id))
        .map(|event| instance_for(event, now))
        .collect()
}

/// Events starting within the upcoming window, in schedule order.
pub fn upcoming_events<'a>(
    store: &'a RecordStore,
    aux: &AuxiliaryState,
    now: DateTime<Utc>,
) -> Vec<EventInstance<'a>> {
    store
        .events()
        .iter()
        .filter(|event| filters::is_upcoming_soon(event, now))
        .filter(|event| !aux.is_event_hidden(&event.id))
        .map(|event| instance_for(event, now))
        .collect()
}

/// All events on a day, group order preserved.
pub fn events_on_day<'a>(
    index: &GroupingIndex,
    store: &'a RecordStore,
    aux: &AuxiliaryState,
    day_id: &str,
    now: DateTime<Utc>,
) -> Vec<EventInstance<'a>> {
    assemble_group(index.events_by_day(store, day_id), aux, now)
}

/// All events in a room, group order preserved.
pub fn events_in_room<'a>(
    index: &GroupingIndex,
    store: &'a RecordStore,
    aux: &AuxiliaryState,
    room_id: &str,
    now: DateTime<Utc>,
) -> Vec<EventInstance<'a>> {
    assemble_group(index.events_by_room(store, room_id), aux, now)
}

/// All events on a track, group order preserved.
pub fn events_on_track<'a>(
    index: &GroupingIndex,
    store: &'a RecordStore,
    aux: &AuxiliaryState,
    track_id: &str,
    now: DateTime<Utc>,
) -> Vec<EventInstance<'a>> {
    assemble_group(index.events_by_track(store, track_id), aux, now)
}

/// Announcements whose validity window contains `now`, in store order.
pub fn active_announcements<'a>(
    store: &'a RecordStore,
    now: DateTime<Utc>,
) -> Vec<&'a Announcement> {
    store
        .announcements()
        .iter()
        .filter(|announcement| filters::is_active_announcement(announcement, now))
        .collect()
}

fn assemble_group<'a>(
    events: Vec<&'a EventRecord>,
    aux: &AuxiliaryState,
    now: DateTime<Utc>,
) -> Vec<EventInstance<'a>> {
    events
        .into_iter()
        .filter(|event| !aux.is_event_hidden(&event.id))
        .map(|event| instance_for(event, now))
        .collect()
}

/// Passed events carry the constant done sentinel instead of a computed
/// value; everything else gets its live position.
fn instance_for<'a>(event: &'a EventRecord, now: DateTime<Utc>) -> EventInstance<'a> {
    if filters::has_passed(event, now) {
        EventInstance::for_passed(event)
    } else {
        EventInstance::for_any(event, now)
    }
}
