//! Client-local persisted state.
//!
//! Favorites, hidden events, view stamps and the time-travel settings are
//! the only mutable data in the system. Mutations go through the methods
//! here (single writer, no concurrent-writer hazard) and persist as TOML
//! under the data dir with an atomic write.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::TimeTravel;
use crate::error::{ConpalError, ConpalResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuxiliaryState {
    #[serde(default)]
    favorite_events: Vec<String>,
    #[serde(default)]
    hidden_events: Vec<String>,
    #[serde(default)]
    favorite_dealers: Vec<String>,
    #[serde(default)]
    pub time_zone_warning_hidden: bool,
    /// Event id -> instant the user last opened its detail view.
    #[serde(default)]
    last_viewed: HashMap<String, DateTime<Utc>>,
    #[serde(default)]
    pub time_travel: TimeTravel,
}

impl AuxiliaryState {
    // FAVORITE EVENTS:

    pub fn is_event_favorite(&self, id: &str) -> bool {
        self.favorite_events.iter().any(|it| it == id)
    }

    pub fn favorite_event(&mut self, id: &str) {
        if !self.is_event_favorite(id) {
            self.favorite_events.push(id.to_string());
        }
    }

    pub fn unfavorite_event(&mut self, id: &str) {
        self.favorite_events.retain(|it| it != id);
    }

    /// Returns the new favorite status.
    pub fn toggle_event_favorite(&mut self, id: &str) -> bool {
        if self.is_event_favorite(id) {
            self.unfavorite_event(id);
            false
        } else {
            self.favorite_event(id);
            true
        }
    }

    pub fn favorite_event_ids(&self) -> &[String] {
        &self.favorite_events
    }

    // HIDDEN EVENTS:

    pub fn is_event_hidden(&self, id: &str) -> bool {
        self.hidden_events.iter().any(|it| it == id)
    }

    pub fn hide_event(&mut self, id: &str) {
        if !self.is_event_hidden(id) {
            self.hidden_events.push(id.to_string());
        }
    }

    pub fn unhide_event(&mut self, id: &str) {
        self.hidden_events.retain(|it| it != id);
    }

    /// Returns the new hidden status.
    pub fn toggle_event_hidden(&mut self, id: &str) -> bool {
        if self.is_event_hidden(id) {
            self.unhide_event(id);
            false
        } else {
            self.hide_event(id);
            true
        }
    }

    pub fn unhide_all_events(&mut self) {
        self.hidden_events.clear();
    }

    // FAVORITE DEALERS:

    pub fn is_dealer_favorite(&self, id: &str) -> bool {
        self.favorite_dealers.iter().any(|it| it == id)
    }

    pub fn favorite_dealer(&mut self, id: &str) {
        if !self.is_dealer_favorite(id) {
            self.favorite_dealers.push(id.to_string());
        }
    }

    pub fn unfavorite_dealer(&mut self, id: &str) {
        self.favorite_dealers.retain(|it| it != id);
    }

    /// Returns the new favorite status.
    pub fn toggle_dealer_favorite(&mut self, id: &str) -> bool {
        if self.is_dealer_favorite(id) {
            self.unfavorite_dealer(id);
            false
        } else {
            self.favorite_dealer(id);
            true
        }
    }

    // VIEW STAMPS:

    pub fn set_viewed(&mut self, id: &str, now: DateTime<Utc>) {
        self.last_viewed.insert(id.to_string(), now);
    }

    pub fn set_viewed_many<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a str>,
        now: DateTime<Utc>,
    ) {
        for id in ids {
            self.set_viewed(id, now);
        }
    }

    pub fn last_viewed(&self, id: &str) -> Option<DateTime<Utc>> {
        self.last_viewed.get(id).copied()
    }

    // PERSISTENCE:

    /// Load state from `path`; an absent file yields the default state.
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

    #[test]
    fn test_toggle_event_favorite() {
        let mut aux = AuxiliaryState::default();
        assert!(aux.toggle_event_favorite("a"));
        assert!(aux.is_event_favorite("a"));

        // Double-add stays a single entry
        aux.favorite_event("a");
        assert_eq!(aux.favorite_event_ids().len(), 1);

        assert!(!aux.toggle_event_favorite("a"));
        assert!(!aux.is_event_favorite("a"));
    }

    #[test]
    fn test_hide_unhide_all() {
        let mut aux = AuxiliaryState::default();
        aux.hide_event("a");
        aux.hide_event("b");
        aux.unhide_event("a");
        assert!(!aux.is_event_hidden("a"));
        assert!(aux.is_event_hidden("b"));

        aux.unhide_all_events();
        assert!(!aux.is_event_hidden("b"));
    }

    #[test]
    fn test_view_stamps() {
        let mut aux = AuxiliaryState::default();
        let t0 = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 8, 6, 14, 0, 0).unwrap();

        assert!(aux.last_viewed("a").is_none());

        aux.set_viewed("a", t0);
        aux.set_viewed_many(["a", "b"], t1);
        assert_eq!(aux.last_viewed("a"), Some(t1));
        assert_eq!(aux.last_viewed("b"), Some(t1));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut aux = AuxiliaryState::default();
        aux.favorite_event("a");
        aux.hide_event("b");
        aux.set_viewed("a", Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap());
        aux.time_travel.travel_forward(chrono::Duration::hours(1));

        let text = toml::to_string_pretty(&aux).unwrap();
        let back: AuxiliaryState = toml::from_str(&text).unwrap();
        assert!(back.is_event_favorite("a"));
        assert!(back.is_event_hidden("b"));
        assert_eq!(back.last_viewed("a"), aux.last_viewed("a"));
        assert_eq!(back.time_travel, aux.time_travel);
    }
}
