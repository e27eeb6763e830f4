//! Global conpal configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConpalError, ConpalResult};

static DEFAULT_DATA_DIR: &str = "~/.conpal";
static DEFAULT_VENUE_TIME_ZONE: &str = "Europe/Berlin";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_venue_time_zone() -> String {
    DEFAULT_VENUE_TIME_ZONE.to_string()
}

fn is_default_venue_time_zone(z: &String) -> bool {
    z == DEFAULT_VENUE_TIME_ZONE
}

/// Global configuration at ~/.config/conpal/config.toml
///
/// The schedule cache and client state live under `data_dir`; exported
/// calendar files go to `calendar_dir` (defaults to `<data_dir>/calendar`).
#[derive(Serialize, Deserialize, Clone)]
pub struct ConpalConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Root URL of the convention content API, e.g. "https://content.example.org/con"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// IANA zone the venue schedule is anchored to.
    #[serde(
        default = "default_venue_time_zone",
        skip_serializing_if = "is_default_venue_time_zone"
    )]
    pub venue_time_zone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_dir: Option<PathBuf>,
}

impl Default for ConpalConfig {
    fn default() -> Self {
        ConpalConfig {
            data_dir: default_data_dir(),
            api_base: None,
            venue_time_zone: default_venue_time_zone(),
            calendar_dir: None,
        }
    }
}

impl ConpalConfig {
    pub fn config_path() -> ConpalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConpalError::Config("Could not determine config directory".into()))?
            .join("conpal");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to ~/.config/conpal/config.toml
    pub fn save(&self) -> ConpalResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| ConpalError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConpalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> ConpalResult<()> {
        let contents = format!(
            "\
# conpal configuration

# Where the cached schedule and client state live:
# data_dir = \"{}\"

# Root URL of the convention content API:
# api_base = \"https://content.example.org/con\"

# IANA zone the venue schedule is anchored to:
# venue_time_zone = \"{}\"

# Where exported .ics files are written:
# calendar_dir = \"~/calendar/convention\"
",
            DEFAULT_DATA_DIR, DEFAULT_VENUE_TIME_ZONE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConpalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ConpalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
