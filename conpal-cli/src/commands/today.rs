use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::conpal::Conpal;
use conpal_core::schedule;

use crate::commands::view_context;
use crate::render;

pub fn run(conpal: &Conpal) -> Result<()> {
    let ctx = view_context(conpal)?;

    let events = schedule::today_schedule(&ctx.store, &ctx.aux, ctx.now, ctx.zone);

    if events.is_empty() {
        println!("{}", "No favorites on your schedule today".dimmed());
        return Ok(());
    }

    println!("{}", "Your day".bold());
    for instance in &events {
        println!("{}", render::event_line(instance, &ctx.store, ctx.zone));
    }

    Ok(())
}
