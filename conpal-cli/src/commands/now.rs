use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::conpal::Conpal;
use conpal_core::schedule;

use crate::commands::view_context;
use crate::render;

pub fn run(conpal: &Conpal) -> Result<()> {
    let ctx = view_context(conpal)?;

    // Sorted by how far along each event is: freshly started first
    let events = schedule::current_events(&ctx.store, &ctx.aux, ctx.now);

    if events.is_empty() {
        println!("{}", "Nothing happening right now".dimmed());
        return Ok(());
    }

    println!("{}", "Happening now".bold());
    for instance in &events {
        println!("{}", render::live_event_line(instance, &ctx.store, ctx.zone));
    }

    Ok(())
}
