//! Conpal data directory management.

use std::path::PathBuf;

use chrono_tz::Tz;
use config::{Config, File};

use crate::conpal_config::ConpalConfig;
use crate::error::{ConpalError, ConpalResult};

#[derive(Clone)]
pub struct Conpal {
    config: ConpalConfig,
}

impl Conpal {
    pub fn load() -> ConpalResult<Self> {
        let config_path = ConpalConfig::config_path()?;

        if !config_path.exists() {
            ConpalConfig::create_default_config(&config_path)?;
        }

        let config: ConpalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| ConpalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConpalError::Config(e.to_string()))?;

        Ok(Conpal { config })
    }

    pub fn config(&self) -> &ConpalConfig {
        &self.config
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.config.data_dir)
    }

    /// JSON cache of the last fetched content snapshot.
    pub fn cache_path(&self) -> PathBuf {
        self.data_path().join("schedule.json")
    }

    /// Client-local state: favorites, hidden events, view stamps, time travel.
    pub fn state_path(&self) -> PathBuf {
        self.data_path().join("state.toml")
    }

    /// Calendar export mappings.
    pub fn exports_path(&self) -> PathBuf {
        self.data_path().join("exports.toml")
    }

    /// Where exported .ics files are written.
    pub fn calendar_path(&self) -> PathBuf {
        match &self.config.calendar_dir {
            Some(dir) => expand(dir),
            None => self.data_path().join("calendar"),
        }
    }

    pub fn api_base(&self) -> Option<&str> {
        self.config.api_base.as_deref()
    }

    /// The venue time zone used for calendar-day comparisons and export.
    pub fn venue_zone(&self) -> ConpalResult<Tz> {
        self.config
            .venue_time_zone
            .parse()
            .map_err(|_| ConpalError::TimeZone(self.config.venue_time_zone.clone()))
    }
}

fn expand(path: &std::path::Path) -> PathBuf {
    let full_path_str = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    PathBuf::from(full_path_str)
}
