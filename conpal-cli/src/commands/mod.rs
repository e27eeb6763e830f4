pub mod announcements;
pub mod dealers;
pub mod events;
pub mod export;
pub mod favorites;
pub mod fetch;
pub mod maps;
pub mod now;
pub mod today;
pub mod travel;
pub mod updates;
pub mod upcoming;

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use conpal_core::auxiliary::AuxiliaryState;
use conpal_core::clock::Clock;
use conpal_core::conpal::Conpal;
use conpal_core::store::RecordStore;

/// Everything a schedule-view command needs: the snapshot, client state and
/// the effective clock.
pub struct ViewContext {
    pub store: RecordStore,
    pub aux: AuxiliaryState,
    pub now: DateTime<Utc>,
    pub zone: Tz,
}

/// Load the cached snapshot, bailing with a fetch hint when empty.
pub fn load_schedule(conpal: &Conpal) -> Result<RecordStore> {
    let store = RecordStore::load(&conpal.cache_path())?;

    if store.events().is_empty() {
        anyhow::bail!(
            "No schedule cached.\n\n\
            Fetch it first with:\n  \
            conpal fetch"
        );
    }

    Ok(store)
}

/// Shared setup for view commands: schedule, state, venue zone and the
/// (possibly simulated) clock, plus the one-time zone-mismatch warning.
pub fn view_context(conpal: &Conpal) -> Result<ViewContext> {
    let store = load_schedule(conpal)?;
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;
    let zone = conpal.venue_zone()?;

    warn_if_zone_differs(conpal, &mut aux, zone)?;

    let clock = Clock::new(aux.time_travel);
    let now = clock.now();

    if clock.is_travelling() {
        println!(
            "{}",
            format!(
                "Simulated clock: {} (conpal travel reset to leave)",
                now.with_timezone(&zone).format("%a %H:%M")
            )
            .dimmed()
        );
    }

    Ok(ViewContext {
        store,
        aux,
        now,
        zone,
    })
}

/// Warn once when the device zone differs from the venue zone; schedule
/// times render in venue time, which trips people up on arrival day.
fn warn_if_zone_differs(conpal: &Conpal, aux: &mut AuxiliaryState, zone: Tz) -> Result<()> {
    if aux.time_zone_warning_hidden {
        return Ok(());
    }

    let Ok(device_zone) = iana_time_zone::get_timezone() else {
        return Ok(());
    };

    if device_zone != zone.name() {
        println!(
            "{}",
            format!(
                "Times are shown in the venue zone ({}); your device is in {}.",
                zone.name(),
                device_zone
            )
            .yellow()
        );
        aux.time_zone_warning_hidden = true;
        aux.save(&conpal.state_path())?;
    }

    Ok(())
}
