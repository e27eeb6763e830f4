//! State mutations: favorites, hidden events, view stamps.

use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::auxiliary::AuxiliaryState;
use conpal_core::clock::Clock;
use conpal_core::conpal::Conpal;

use crate::commands::load_schedule;

pub fn favorite(conpal: &Conpal, event_id: &str) -> Result<()> {
    let title = event_title(conpal, event_id)?;
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;

    aux.favorite_event(event_id);
    aux.save(&conpal.state_path())?;

    println!("{}", format!("Favorited: {}", title).green());
    Ok(())
}

pub fn unfavorite(conpal: &Conpal, event_id: &str) -> Result<()> {
    let title = event_title(conpal, event_id)?;
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;

    aux.unfavorite_event(event_id);
    aux.save(&conpal.state_path())?;

    println!("Unfavorited: {}", title);
    Ok(())
}

pub fn hide(conpal: &Conpal, event_id: &str) -> Result<()> {
    let title = event_title(conpal, event_id)?;
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;

    aux.hide_event(event_id);
    aux.save(&conpal.state_path())?;

    println!("Hidden: {}", title);
    Ok(())
}

pub fn unhide(conpal: &Conpal, event_id: &str) -> Result<()> {
    let title = event_title(conpal, event_id)?;
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;

    aux.unhide_event(event_id);
    aux.save(&conpal.state_path())?;

    println!("Unhidden: {}", title);
    Ok(())
}

pub fn unhide_all(conpal: &Conpal) -> Result<()> {
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;

    aux.unhide_all_events();
    aux.save(&conpal.state_path())?;

    println!("All events unhidden");
    Ok(())
}

/// Stamp the event as viewed at the effective clock, clearing its
/// changed-since-seen flag.
pub fn viewed(conpal: &Conpal, event_id: &str) -> Result<()> {
    let title = event_title(conpal, event_id)?;
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;

    let now = Clock::new(aux.time_travel).now();
    aux.set_viewed(event_id, now);
    aux.save(&conpal.state_path())?;

    println!("Viewed: {}", title);
    Ok(())
}

pub fn favorite_dealer(conpal: &Conpal, dealer_id: &str) -> Result<()> {
    let name = dealer_name(conpal, dealer_id)?;
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;

    aux.favorite_dealer(dealer_id);
    aux.save(&conpal.state_path())?;

    println!("{}", format!("Favorited dealer: {}", name).green());
    Ok(())
}

pub fn unfavorite_dealer(conpal: &Conpal, dealer_id: &str) -> Result<()> {
    let name = dealer_name(conpal, dealer_id)?;
    let mut aux = AuxiliaryState::load(&conpal.state_path())?;

    aux.unfavorite_dealer(dealer_id);
    aux.save(&conpal.state_path())?;

    println!("Unfavorited dealer: {}", name);
    Ok(())
}

fn event_title(conpal: &Conpal, event_id: &str) -> Result<String> {
    let store = load_schedule(conpal)?;
    match store.event(event_id) {
        Some(event) => Ok(event.title.clone()),
        None => anyhow::bail!("Event '{}' not found in the cached schedule", event_id),
    }
}

fn dealer_name(conpal: &Conpal, dealer_id: &str) -> Result<String> {
    let store = load_schedule(conpal)?;
    match store.dealer(dealer_id) {
        Some(dealer) => Ok(dealer.full_name().to_string()),
        None => anyhow::bail!("Dealer '{}' not found in the cached schedule", dealer_id),
    }
}
