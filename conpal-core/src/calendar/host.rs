//! Calendar host abstraction.
//!
//! The exporter talks to the device/user calendar through this trait; the
//! shipped implementation writes one .ics file per exported event into a
//! directory, which desktop calendar apps can watch or import.

use std::path::PathBuf;

use crate::calendar::entry::CalendarEntry;
use crate::calendar::ics::generate_ics;
use crate::error::{ConpalError, ConpalResult};

/// A calendar service events can be exported to.
pub trait CalendarHost {
    /// Make sure the host can be written to (the permission-request analog).
    fn ensure_access(&self) -> bool;

    /// Create an entry, returning the host-assigned identifier.
    fn create_event(&self, entry: &CalendarEntry) -> ConpalResult<String>;

    fn update_event(&self, calendar_event_id: &str, entry: &CalendarEntry) -> ConpalResult<()>;

    /// Deleting an entry that is already gone is not an error.
    fn delete_event(&self, calendar_event_id: &str) -> ConpalResult<()>;
}

/// Writes exported events as .ics files; the file stem is the host-assigned
/// identifier.
pub struct IcsDirectoryHost {
    dir: PathBuf,
}

impl IcsDirectoryHost {
    pub fn new(dir: PathBuf) -> Self {
        IcsDirectoryHost { dir }
    }

    fn path_for(&self, calendar_event_id: &str) -> PathBuf {
        self.dir.join(format!("{}.ics", calendar_event_id))
    }

    /// Generate a slug for the entry that doesn't collide with existing
    /// files. If the base slug exists, tries slug-2, slug-3, etc.
    fn unique_slug_for(&self, entry: &CalendarEntry) -> ConpalResult<String> {
        let base = format!(
            "{}__{}",
            entry.start.with_timezone(&entry.zone).format("%Y-%m-%dT%H%M"),
            slug::slugify(&entry.title)
        );

        if !self.path_for(&base).exists() {
            return Ok(base);
        }

        for n in 2..=100 {
            let suffixed = format!("{}-{}", base, n);
            if !self.path_for(&suffixed).exists() {
                return Ok(suffixed);
            }
        }

        Err(ConpalError::CalendarHost(format!(
            "Too many calendar file collisions for '{}'",
            base
        )))
    }
}

impl CalendarHost for IcsDirectoryHost {
    fn ensure_access(&self) -> bool {
        std::fs::create_dir_all(&self.dir).is_ok()
    }

    fn create_event(&self, entry: &CalendarEntry) -> ConpalResult<String> {
        std::fs::create_dir_all(&self.dir)?;

        let slug = self.unique_slug_for(entry)?;
        // The uid matches the file stem so updates regenerate the same entry
        let uid = format!("{}@conpal", slug);
        let content = generate_ics(entry, &uid)?;

        std::fs::write(self.path_for(&slug), content)?;
        Ok(slug)
    }

    fn update_event(&self, calendar_event_id: &str, entry: &CalendarEntry) -> ConpalResult<()> {
        let path = self.path_for(calendar_event_id);
        if !path.exists() {
            return Err(ConpalError::CalendarHost(format!(
                "No exported entry '{}'",
                calendar_event_id
            )));
        }

        let uid = format!("{}@conpal", calendar_event_id);
        let content = generate_ics(entry, &uid)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn delete_event(&self, calendar_event_id: &str) -> ConpalResult<()> {
        let path = self.path_for(calendar_event_id);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
