//! Event annotation: progress instances and favorite-change flags.

use chrono::{DateTime, Utc};

use crate::auxiliary::AuxiliaryState;
use crate::event::EventRecord;
use crate::schedule::filters::{self, NOT_STARTED_PROGRESS, PASSED_PROGRESS};
use crate::store::RecordStore;

/// An event paired with its progress value for rendering.
#[derive(Debug, Clone, Copy)]
pub struct EventInstance<'a> {
    pub event: &'a EventRecord,
    pub progress: f64,
}

impl<'a> EventInstance<'a> {
    /// Instance for an upcoming or running event. Events without usable
    /// bounds get the not-started sentinel so they render without a bar.
    pub fn for_any(event: &'a EventRecord, now: DateTime<Utc>) -> Self {
        let progress = filters::progress(event, now).unwrap_or(NOT_STARTED_PROGRESS);
        EventInstance { event, progress }
    }

    /// Instance for an event that is already over.
    pub fn for_passed(event: &'a EventRecord) -> Self {
        EventInstance {
            event,
            progress: PASSED_PROGRESS,
        }
    }

    pub fn is_live(&self) -> bool {
        (0.0..=1.0).contains(&self.progress)
    }

    pub fn is_done(&self) -> bool {
        self.progress > 1.0
    }
}

/// Favorited events that changed upstream since the user last opened them.
///
/// An event that was never viewed cannot be "updated since last seen" and
/// is always excluded, regardless of its change stamp.
pub fn updated_favorites<'a>(
    store: &'a RecordStore,
    aux: &AuxiliaryState,
) -> Vec<&'a EventRecord> {
    store
        .events()
        .iter()
        .filter(|event| aux.is_event_favorite(&event.id))
        .filter(|event| match aux.last_viewed(&event.id) {
            Some(seen) => event.last_change > seen,
            None => false,
        })
        .collect()
}
