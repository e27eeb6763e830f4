//! Simulated-clock control for testing schedule-dependent views.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use conpal_core::auxiliary::AuxiliaryState;
use conpal_core::clock::Clock;
use conpal_core::conpal::Conpal;

pub fn forward(conpal: &Conpal, input: &str) -> Result<()> {
    let amount = parse_travel_duration(input)?;
    apply(conpal, |aux| aux.time_travel.travel_forward(amount))
}

pub fn backward(conpal: &Conpal, input: &str) -> Result<()> {
    let amount = parse_travel_duration(input)?;
    apply(conpal, |aux| aux.time_travel.travel_backward(amount))
}

pub fn to(conpal: &Conpal, input: &str) -> Result<()> {
    let target = parse_travel_target(input, conpal.venue_zone()?)?;
    apply(conpal, |aux| aux.time_travel.travel_to(target))
}

pub fn reset(conpal: &Conpal) -> Result<()> {
    apply(conpal, |aux| aux.time_travel.reset())
}

pub fn off(conpal: &Conpal) -> Result<()> {
    apply(conpal, |aux| aux.time_travel.set_enabled(false))
}

fn apply(conpal: &Conpal, mutate: impl FnOnce(&mut AuxiliaryState)) -> Result<()> {
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;
    mutate(&mut aux);
    aux.save(&conpal.state_path())?;

    let zone = conpal.venue_zone()?;
    let clock = Clock::new(aux.time_travel);

    println!(
        "Real time:      {}",
        Clock::real().with_timezone(&zone).format("%Y-%m-%d %H:%M %Z")
    );
    if clock.is_travelling() {
        println!(
            "{}",
            format!(
                "Simulated time: {}",
                clock.now().with_timezone(&zone).format("%Y-%m-%d %H:%M %Z")
            )
            .yellow()
        );
    } else {
        println!("{}", "Time travel disabled".dimmed());
    }

    Ok(())
}

/// Parse a duration like "1h 30m".
fn parse_travel_duration(input: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(input)
        .map_err(|_| anyhow::anyhow!("Could not parse duration: \"{}\"", input))?;
    Duration::from_std(std_dur).context("Duration too large")
}

/// Parse a date/time, interpreted in the venue zone. Tries the exact forms
/// first, then natural language ("tomorrow 2pm") via fuzzydate.
fn parse_travel_target(input: &str, zone: Tz) -> Result<DateTime<Utc>> {
    let naive = chrono::NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).unwrap())
        })
        .or_else(|_| fuzzydate::parse(input))
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    naive
        .and_local_timezone(zone)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("\"{}\" does not exist in {}", input, zone.name()))
}
