//! Persisted mappings from schedule events to exported calendar entries.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConpalError, ConpalResult};

/// Link between a schedule event and the calendar entry created for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventMapping {
    pub event_id: String,
    /// Identifier assigned by the calendar host.
    pub calendar_event_id: String,
    pub exported_at: DateTime<Utc>,
    /// Keep the exported entry in sync with upstream changes.
    pub auto_update: bool,
}

/// All exported events, keyed by event id. Created on export, removed on
/// un-export; persisted as TOML under the data dir.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarExportState {
    #[serde(default)]
    exported: HashMap<String, CalendarEventMapping>,
}

impl CalendarExportState {
    pub fn add_exported_event(&mut self, mapping: CalendarEventMapping) {
        self.exported.insert(mapping.event_id.clone(), mapping);
    }

    pub fn remove_exported_event(&mut self, event_id: &str) -> Option<CalendarEventMapping> {
        self.exported.remove(event_id)
    }

    /// Returns false when the event was never exported.
    pub fn set_auto_update(&mut self, event_id: &str, auto_update: bool) -> bool {
        match self.exported.get_mut(event_id) {
            Some(mapping) => {
                mapping.auto_update = auto_update;
                true
            }
            None => false,
        }
    }

    /// Restamp the export time after a successful push to the host.
    pub fn touch(&mut self, event_id: &str, now: DateTime<Utc>) {
        if let Some(mapping) = self.exported.get_mut(event_id) {
            mapping.exported_at = now;
        }
    }

    pub fn clear_all(&mut self) {
        self.exported.clear();
    }

    pub fn is_exported(&self, event_id: &str) -> bool {
        self.exported.contains_key(event_id)
    }

    pub fn mapping_for(&self, event_id: &str) -> Option<&CalendarEventMapping> {
        self.exported.get(event_id)
    }

    pub fn auto_update_mappings(&self) -> Vec<&CalendarEventMapping> {
        let mut mappings: Vec<_> = self
            .exported
            .values()
            .filter(|mapping| mapping.auto_update)
            .collect();
        mappings.sort_by(|a, b| a.event_id.cmp(&b.event_id));
        mappings
    }

    pub fn mappings(&self) -> Vec<&CalendarEventMapping> {
        let mut mappings: Vec<_> = self.exported.values().collect();
        mappings.sort_by(|a, b| a.exported_at.cmp(&b.exported_at));
        mappings
    }

    pub fn exported_count(&self) -> usize {
        self.exported.len()
    }

    /// Load state from `path`; an absent file yields the empty state.
    pub fn load(path: &Path) -> ConpalResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConpalError::Serialization(e.to_string()))
    }

    /// Persist atomically (write to a temp file, then rename).
    pub fn save(&self, path: &Path) -> ConpalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConpalError::Serialization(e.to_string()))?;

        let temp = path.with_extension("toml.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_mapping(event_id: &str, auto_update: bool) -> CalendarEventMapping {
        CalendarEventMapping {
            event_id: event_id.to_string(),
            calendar_event_id: format!("cal-{}", event_id),
            exported_at: Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
            auto_update,
        }
    }

    #[test]
    fn test_add_query_remove() {
        let mut state = CalendarExportState::default();
        assert!(!state.is_exported("a"));

        state.add_exported_event(make_mapping("a", false));
        assert!(state.is_exported("a"));
        assert_eq!(state.exported_count(), 1);
        assert_eq!(state.mapping_for("a").unwrap().calendar_event_id, "cal-a");

        let removed = state.remove_exported_event("a").unwrap();
        assert_eq!(removed.event_id, "a");
        assert!(!state.is_exported("a"));
    }

    #[test]
    fn test_auto_update_selection() {
        let mut state = CalendarExportState::default();
        state.add_exported_event(make_mapping("b", true));
        state.add_exported_event(make_mapping("a", false));
        state.add_exported_event(make_mapping("c", true));

        let auto: Vec<&str> = state
            .auto_update_mappings()
            .iter()
            .map(|m| m.event_id.as_str())
            .collect();
        assert_eq!(auto, vec!["b", "c"]);

        assert!(state.set_auto_update("a", true));
        assert_eq!(state.auto_update_mappings().len(), 3);
        assert!(!state.set_auto_update("nope", true));
    }

    #[test]
    fn test_clear_all() {
        let mut state = CalendarExportState::default();
        state.add_exported_event(make_mapping("a", false));
        state.add_exported_event(make_mapping("b", true));
        state.clear_all();
        assert_eq!(state.exported_count(), 0);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut state = CalendarExportState::default();
        state.add_exported_event(make_mapping("a", true));

        let text = toml::to_string_pretty(&state).unwrap();
        let back: CalendarExportState = toml::from_str(&text).unwrap();
        assert_eq!(back.mapping_for("a"), state.mapping_for("a"));
    }
}
