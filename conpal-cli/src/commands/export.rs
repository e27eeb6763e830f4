//! Calendar export commands.

use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::auxiliary::AuxiliaryState;
use conpal_core::calendar::{
    CalendarExportState, CalendarExporter, ErrorReporter, IcsDirectoryHost, pending_auto_updates,
};
use conpal_core::clock::Clock;
use conpal_core::conpal::Conpal;
use conpal_core::error::ConpalError;

use crate::commands::load_schedule;
use crate::render::Render;

/// Forwards host failures to stderr; the result object is what the user
/// acts on, this is the diagnostic trail.
struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn capture(&self, error: &ConpalError) {
        eprintln!("{}", format!("calendar: {}", error).dimmed());
    }
}

fn make_exporter(conpal: &Conpal) -> CalendarExporter<IcsDirectoryHost> {
    CalendarExporter::with_reporter(
        IcsDirectoryHost::new(conpal.calendar_path()),
        Box::new(StderrReporter),
    )
}

pub fn export(conpal: &Conpal, event_id: &str, auto_update: Option<bool>) -> Result<()> {
    let store = load_schedule(conpal)?;
    let aux = AuxiliaryState::load(&conpal.state_path())?;
    let mut state = CalendarExportState::load(&conpal.exports_path())?;

    let Some(details) = store.event_with_details(event_id) else {
        anyhow::bail!("Event '{}' not found in the cached schedule", event_id);
    };

    let exporter = make_exporter(conpal);
    let result = exporter.export_event(
        details.event,
        details.room,
        conpal.venue_zone()?,
        aux.is_event_favorite(event_id),
        auto_update,
        &mut state,
        Clock::new(aux.time_travel).now(),
    );

    if result.success {
        state.save(&conpal.exports_path())?;
        println!(
            "{}",
            format!(
                "Exported: {} -> {}.ics",
                details.event.title,
                result.calendar_event_id.as_deref().unwrap_or_default()
            )
            .green()
        );
    } else {
        println!(
            "{}",
            result.error.as_deref().unwrap_or("Export failed").red()
        );
    }

    Ok(())
}

pub fn unexport(conpal: &Conpal, event_id: &str) -> Result<()> {
    let mut state = CalendarExportState::load(&conpal.exports_path())?;

    let exporter = make_exporter(conpal);
    let result = exporter.unexport_event(event_id, &mut state);

    if result.success {
        state.save(&conpal.exports_path())?;
        println!("Removed from calendar");
    } else {
        println!(
            "{}",
            result.error.as_deref().unwrap_or("Un-export failed").red()
        );
    }

    Ok(())
}

pub fn list(conpal: &Conpal) -> Result<()> {
    let store = load_schedule(conpal)?;
    let state = CalendarExportState::load(&conpal.exports_path())?;

    if state.exported_count() == 0 {
        println!("{}", "No exported events".dimmed());
        return Ok(());
    }

    println!("{}", format!("{} exported", state.exported_count()).bold());
    for mapping in state.mappings() {
        // Prefer the live title; fall back to the raw id for events that
        // dropped out of the schedule
        match store.event(&mapping.event_id) {
            Some(event) => println!("  {}\n  {}", event.title, mapping.render().dimmed()),
            None => println!("{}", mapping.render()),
        }
    }

    Ok(())
}

pub fn sync_calendar(conpal: &Conpal) -> Result<()> {
    let store = load_schedule(conpal)?;
    let aux = AuxiliaryState::load(&conpal.state_path())?;
    let mut state = CalendarExportState::load(&conpal.exports_path())?;

    let pending = pending_auto_updates(&store, &aux, &state);
    if pending.is_empty() {
        println!("{}", "All exported entries are up to date".dimmed());
        return Ok(());
    }

    let exporter = make_exporter(conpal);
    let outcome = exporter.process_updates(
        &store,
        &aux,
        &mut state,
        conpal.venue_zone()?,
        Clock::new(aux.time_travel).now(),
    );
    state.save(&conpal.exports_path())?;

    if outcome.updated > 0 {
        println!("{}", format!("Updated {} calendar entries", outcome.updated).green());
    }
    if outcome.failed > 0 {
        println!("{}", format!("{} updates failed", outcome.failed).red());
    }

    Ok(())
}
