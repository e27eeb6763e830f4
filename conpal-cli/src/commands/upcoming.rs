use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::conpal::Conpal;
use conpal_core::schedule::{self, UPCOMING_WINDOW_MINUTES};

use crate::commands::view_context;
use crate::render;

pub fn run(conpal: &Conpal) -> Result<()> {
    let ctx = view_context(conpal)?;

    let events = schedule::upcoming_events(&ctx.store, &ctx.aux, ctx.now);

    if events.is_empty() {
        println!(
            "{}",
            format!("Nothing starting in the next {} minutes", UPCOMING_WINDOW_MINUTES).dimmed()
        );
        return Ok(());
    }

    println!("{}", "Starting soon".bold());
    for instance in &events {
        println!("{}", render::event_line(instance, &ctx.store, ctx.zone));
    }

    Ok(())
}
