//! Terminal rendering for conpal types.
//!
//! Extension trait plus helpers that add colored output using owo_colors.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use conpal_core::calendar::CalendarEventMapping;
use conpal_core::directory::Announcement;
use conpal_core::schedule::EventInstance;
use conpal_core::store::RecordStore;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Announcement {
    fn render(&self) -> String {
        let area = self
            .area
            .as_deref()
            .map(|a| format!(" [{}]", a).dimmed().to_string())
            .unwrap_or_default();

        format!("  {}{}\n    {}", self.title.bold(), area, self.content)
    }
}

impl Render for CalendarEventMapping {
    fn render(&self) -> String {
        let auto = if self.auto_update {
            " auto".green().to_string()
        } else {
            String::new()
        };

        format!(
            "  {} {}{}",
            self.event_id,
            format!("exported {}", self.exported_at.format("%Y-%m-%d %H:%M"))
                .dimmed(),
            auto
        )
    }
}

/// One listing line for an event: time range, title, room tag, live/done
/// markers.
pub fn event_line(instance: &EventInstance, store: &RecordStore, zone: Tz) -> String {
    let event = instance.event;

    let mut line = format!("  {} {}", time_range(instance, zone), event.title);

    if let Some(subtitle) = &event.subtitle {
        line.push_str(&format!(" {}", subtitle.dimmed()));
    }

    if let Some(room) = event.room_id.as_deref().and_then(|id| store.room(id)) {
        line.push_str(&format!(" {}", format!("[{}]", room.display_tag()).dimmed()));
    }

    if instance.is_live() {
        line.push_str(&format!(" {}", "LIVE".green().bold()));
    } else if instance.is_done() {
        line.push_str(&format!(" {}", "done".dimmed()));
    }

    line
}

/// Event line plus a progress bar underneath, for the "now" view.
pub fn live_event_line(instance: &EventInstance, store: &RecordStore, zone: Tz) -> String {
    format!(
        "{}\n          {}",
        event_line(instance, store, zone),
        progress_bar(instance.progress)
    )
}

/// Text progress bar: `[#####.....] 50%`
pub fn progress_bar(progress: f64) -> String {
    const WIDTH: usize = 20;

    let clamped = progress.clamp(0.0, 1.0);
    let filled = (clamped * WIDTH as f64).round() as usize;

    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        ".".repeat(WIDTH - filled),
        clamped * 100.0
    )
}

/// Format an event's time range in the venue zone (e.g. "12:00-13:00").
fn time_range(instance: &EventInstance, zone: Tz) -> String {
    match (instance.event.start, instance.event.end) {
        (Some(start), Some(end)) => format!(
            "{}-{}",
            start.with_timezone(&zone).format("%H:%M"),
            end.with_timezone(&zone).format("%H:%M")
        ),
        _ => "  (unscheduled)".to_string(),
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow",
/// "Wed Aug 5"), relative to `now` in the venue zone.
pub fn date_label(date: NaiveDate, now: DateTime<Utc>, zone: Tz) -> String {
    let today = now.with_timezone(&zone).date_naive();

    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_progress_bar_bands() {
        assert_eq!(progress_bar(0.5), "[##########..........]  50%");
        assert_eq!(progress_bar(0.0), "[....................]   0%");
        // Out-of-band values clamp instead of overflowing the bar
        assert_eq!(progress_bar(1.1), "[####################] 100%");
        assert_eq!(progress_bar(-1.0), "[....................]   0%");
    }

    #[test]
    fn test_date_label_relative_to_venue_day() {
        let zone = chrono_tz::Europe::Berlin;
        // 23:30 UTC on Aug 5 is already Aug 6 in Berlin
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 23, 30, 0).unwrap();

        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(), now, zone),
            "Today"
        );
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(), now, zone),
            "Tomorrow"
        );
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2026, 8, 9).unwrap(), now, zone),
            "Sun Aug 9"
        );
    }
}
