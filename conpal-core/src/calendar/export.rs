//! Calendar export orchestration.
//!
//! All outcomes surface as result objects; host failures are forwarded to
//! the error reporter and resolve to `success: false` for the caller to
//! display, never a raised error.

use std::cell::Cell;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::auxiliary::AuxiliaryState;
use crate::calendar::entry::CalendarEntry;
use crate::calendar::host::CalendarHost;
use crate::calendar::mapping::{CalendarEventMapping, CalendarExportState};
use crate::error::ConpalError;
use crate::event::EventRecord;
use crate::schedule::updated_favorites;
use crate::store::RecordStore;

/// Outcome of an export or un-export attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarExportResult {
    pub success: bool,
    pub calendar_event_id: Option<String>,
    pub error: Option<String>,
}

impl CalendarExportResult {
    fn ok(calendar_event_id: String) -> Self {
        CalendarExportResult {
            success: true,
            calendar_event_id: Some(calendar_event_id),
            error: None,
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        CalendarExportResult {
            success: false,
            calendar_event_id: None,
            error: Some(error.into()),
        }
    }
}

/// Collaborator for surfacing export failures to an exception tracker.
pub trait ErrorReporter {
    fn capture(&self, error: &ConpalError);
}

/// Default reporter: swallow everything.
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn capture(&self, _error: &ConpalError) {}
}

/// Counts from one auto-update pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpdatePassOutcome {
    pub updated: usize,
    pub failed: usize,
}

/// Drives a [`CalendarHost`], guarding against re-entrant exports.
pub struct CalendarExporter<H: CalendarHost> {
    host: H,
    reporter: Box<dyn ErrorReporter>,
    exporting: Cell<bool>,
}

impl<H: CalendarHost> CalendarExporter<H> {
    pub fn new(host: H) -> Self {
        Self::with_reporter(host, Box::new(NoopReporter))
    }

    pub fn with_reporter(host: H, reporter: Box<dyn ErrorReporter>) -> Self {
        CalendarExporter {
            host,
            reporter,
            exporting: Cell::new(false),
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.get()
    }

    /// Export one event. A second attempt while one is in flight is
    /// rejected immediately, not queued.
    pub fn export_event(
        &self,
        details: &EventRecord,
        room: Option<&crate::event::EventRoom>,
        zone: Tz,
        favorite: bool,
        auto_update: Option<bool>,
        state: &mut CalendarExportState,
        now: DateTime<Utc>,
    ) -> CalendarExportResult {
        if !self.try_begin() {
            return CalendarExportResult::failure("Already exporting an event");
        }
        let result = self.do_export(details, room, zone, favorite, auto_update, state, now);
        self.finish();
        result
    }

    fn do_export(
        &self,
        details: &EventRecord,
        room: Option<&crate::event::EventRoom>,
        zone: Tz,
        favorite: bool,
        auto_update: Option<bool>,
        state: &mut CalendarExportState,
        now: DateTime<Utc>,
    ) -> CalendarExportResult {
        if state.is_exported(&details.id) {
            return CalendarExportResult::failure("Event is already exported");
        }

        if !self.host.ensure_access() {
            return CalendarExportResult::failure("Calendar access not granted");
        }

        let Some(entry) = CalendarEntry::for_event(details, room, zone) else {
            return CalendarExportResult::failure("Event has no scheduled time");
        };

        match self.host.create_event(&entry) {
            Ok(calendar_event_id) => {
                state.add_exported_event(CalendarEventMapping {
                    event_id: details.id.clone(),
                    calendar_event_id: calendar_event_id.clone(),
                    exported_at: now,
                    // Favorites track upstream changes unless told otherwise
                    auto_update: auto_update.unwrap_or(favorite),
                });
                CalendarExportResult::ok(calendar_event_id)
            }
            Err(e) => {
                self.reporter.capture(&e);
                CalendarExportResult::failure(e.to_string())
            }
        }
    }

    /// Remove an exported event from the host and forget its mapping.
    pub fn unexport_event(
        &self,
        event_id: &str,
        state: &mut CalendarExportState,
    ) -> CalendarExportResult {
        let Some(mapping) = state.remove_exported_event(event_id) else {
            return CalendarExportResult::failure("Event is not exported");
        };

        match self.host.delete_event(&mapping.calendar_event_id) {
            Ok(()) => CalendarExportResult::ok(mapping.calendar_event_id),
            Err(e) => {
                self.reporter.capture(&e);
                CalendarExportResult::failure(e.to_string())
            }
        }
    }

    /// Push upstream changes to every auto-update export whose event
    /// changed since last seen. Individual failures are reported and
    /// skipped; the pass continues.
    pub fn process_updates(
        &self,
        store: &RecordStore,
        aux: &AuxiliaryState,
        state: &mut CalendarExportState,
        zone: Tz,
        now: DateTime<Utc>,
    ) -> UpdatePassOutcome {
        let mut outcome = UpdatePassOutcome::default();

        let pending: Vec<(String, String)> = pending_auto_updates(store, aux, state)
            .iter()
            .filter_map(|event| {
                state
                    .mapping_for(&event.id)
                    .map(|m| (event.id.clone(), m.calendar_event_id.clone()))
            })
            .collect();

        for (event_id, calendar_event_id) in pending {
            let Some(event) = store.event(&event_id) else {
                continue;
            };
            let room = event.room_id.as_deref().and_then(|id| store.room(id));

            let Some(entry) = CalendarEntry::for_event(event, room, zone) else {
                outcome.failed += 1;
                continue;
            };

            match self.host.update_event(&calendar_event_id, &entry) {
                Ok(()) => {
                    state.touch(&event_id, now);
                    outcome.updated += 1;
                }
                Err(e) => {
                    self.reporter.capture(&e);
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }

    fn try_begin(&self) -> bool {
        !self.exporting.replace(true)
    }

    fn finish(&self) {
        self.exporting.set(false);
    }
}

/// Favorites changed since last seen that are mapped for auto-update;
/// the work list for [`CalendarExporter::process_updates`].
pub fn pending_auto_updates<'a>(
    store: &'a RecordStore,
    aux: &AuxiliaryState,
    state: &CalendarExportState,
) -> Vec<&'a EventRecord> {
    updated_favorites(store, aux)
        .into_iter()
        .filter(|event| {
            state
                .mapping_for(&event.id)
                .is_some_and(|mapping| mapping.auto_update)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Snapshot;
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;

    const ZONE: Tz = chrono_tz::Europe::Berlin;

    /// In-memory host recording calls; `fail` makes every call error.
    #[derive(Default)]
    struct FakeHost {
        fail: bool,
        created: RefCell<Vec<String>>,
        updated: RefCell<Vec<String>>,
        deleted: RefCell<Vec<String>>,
    }

    impl CalendarHost for FakeHost {
        fn ensure_access(&self) -> bool {
            true
        }

        fn create_event(&self, entry: &CalendarEntry) -> crate::error::ConpalResult<String> {
            if self.fail {
                return Err(ConpalError::CalendarHost("create failed".into()));
            }
            let id = format!("cal-{}", self.created.borrow().len());
            self.created.borrow_mut().push(entry.title.clone());
            Ok(id)
        }

        fn update_event(
            &self,
            calendar_event_id: &str,
            _entry: &CalendarEntry,
        ) -> crate::error::ConpalResult<()> {
            if self.fail {
                return Err(ConpalError::CalendarHost("update failed".into()));
            }
            self.updated.borrow_mut().push(calendar_event_id.to_string());
            Ok(())
        }

        fn delete_event(&self, calendar_event_id: &str) -> crate::error::ConpalResult<()> {
            self.deleted.borrow_mut().push(calendar_event_id.to_string());
            Ok(())
        }
    }

    fn make_event(id: &str, last_change: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: format!("Event {}", id),
            subtitle: None,
            abstract_text: None,
            description: None,
            start: Some(Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2026, 8, 6, 13, 0, 0).unwrap()),
            room_id: None,
            track_id: None,
            day_id: None,
            banner_image_id: None,
            poster_image_id: None,
            glyph: None,
            tags: vec![],
            last_change,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_export_creates_mapping_with_favorite_auto_update() {
        let exporter = CalendarExporter::new(FakeHost::default());
        let mut state = CalendarExportState::default();
        let event = make_event("a", now());

        let result = exporter.export_event(&event, None, ZONE, true, None, &mut state, now());
        assert!(result.success, "unexpected failure: {:?}", result.error);

        let mapping = state.mapping_for("a").unwrap();
        assert!(mapping.auto_update, "favorites default to auto-update");
        assert_eq!(Some(mapping.calendar_event_id.clone()), result.calendar_event_id);
    }

    #[test]
    fn test_double_export_is_rejected_as_result_object() {
        let exporter = CalendarExporter::new(FakeHost::default());
        let mut state = CalendarExportState::default();
        let event = make_event("a", now());

        assert!(
            exporter
                .export_event(&event, None, ZONE, false, None, &mut state, now())
                .success
        );

        let second = exporter.export_event(&event, None, ZONE, false, None, &mut state, now());
        assert!(!second.success);
        assert_eq!(second.error.as_deref(), Some("Event is already exported"));
    }

    #[test]
    fn test_in_flight_guard_rejects_reentrant_export() {
        let exporter = CalendarExporter::new(FakeHost::default());

        assert!(exporter.try_begin());
        assert!(exporter.is_exporting());
        // A second attempt while one is in flight loses the guard
        assert!(!exporter.try_begin());

        exporter.finish();
        assert!(!exporter.is_exporting());
        assert!(exporter.try_begin());
    }

    #[test]
    fn test_host_failure_resolves_to_result_not_error() {
        let exporter = CalendarExporter::new(FakeHost {
            fail: true,
            ..Default::default()
        });
        let mut state = CalendarExportState::default();
        let event = make_event("a", now());

        let result = exporter.export_event(&event, None, ZONE, false, None, &mut state, now());
        assert!(!result.success);
        assert!(result.error.unwrap().contains("create failed"));
        assert!(!state.is_exported("a"), "failed exports leave no mapping");
    }

    #[test]
    fn test_unexport_removes_mapping_and_host_entry() {
        let exporter = CalendarExporter::new(FakeHost::default());
        let mut state = CalendarExportState::default();
        let event = make_event("a", now());

        exporter.export_event(&event, None, ZONE, false, None, &mut state, now());
        let result = exporter.unexport_event("a", &mut state);
        assert!(result.success);
        assert!(!state.is_exported("a"));
        assert_eq!(exporter.host.deleted.borrow().len(), 1);

        let again = exporter.unexport_event("a", &mut state);
        assert!(!again.success);
    }

    #[test]
    fn test_update_pass_only_touches_pending_auto_updates() {
        let t0 = now();
        let store = RecordStore::from_snapshot(Snapshot {
            events: vec![
                make_event("changed", t0 + Duration::hours(1)),
                make_event("unchanged", t0 - Duration::hours(1)),
                make_event("manual", t0 + Duration::hours(1)),
            ],
            ..Default::default()
        });

        let mut aux = AuxiliaryState::default();
        for id in ["changed", "unchanged", "manual"] {
            aux.favorite_event(id);
            aux.set_viewed(id, t0);
        }

        let exporter = CalendarExporter::new(FakeHost::default());
        let mut state = CalendarExportState::default();
        for (id, auto) in [("changed", None), ("unchanged", None), ("manual", Some(false))] {
            let event = store.event(id).unwrap();
            exporter.export_event(event, None, ZONE, true, auto, &mut state, t0);
        }

        let pending = pending_auto_updates(&store, &aux, &state);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "changed");

        let later = t0 + Duration::hours(2);
        let outcome = exporter.process_updates(&store, &aux, &mut state, ZONE, later);
        assert_eq!(outcome, UpdatePassOutcome { updated: 1, failed: 0 });
        assert_eq!(exporter.host.updated.borrow().len(), 1);
        assert_eq!(state.mapping_for("changed").unwrap().exported_at, later);
        assert_eq!(state.mapping_for("unchanged").unwrap().exported_at, t0);
    }

    #[test]
    fn test_update_pass_skips_failures_and_continues() {
        let t0 = now();
        let store = RecordStore::from_snapshot(Snapshot {
            events: vec![
                make_event("a", t0 + Duration::hours(1)),
                make_event("b", t0 + Duration::hours(1)),
            ],
            ..Default::default()
        });

        let mut aux = AuxiliaryState::default();
        for id in ["a", "b"] {
            aux.favorite_event(id);
            aux.set_viewed(id, t0);
        }

        let good = CalendarExporter::new(FakeHost::default());
        let mut state = CalendarExportState::default();
        for id in ["a", "b"] {
            let event = store.event(id).unwrap();
            good.export_event(event, None, ZONE, true, None, &mut state, t0);
        }

        let failing = CalendarExporter::new(FakeHost {
            fail: true,
            ..Default::default()
        });
        let outcome = failing.process_updates(&store, &aux, &mut state, ZONE, t0);
        assert_eq!(outcome, UpdatePassOutcome { updated: 0, failed: 2 });
    }
}
