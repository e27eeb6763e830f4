use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::conpal::Conpal;
use conpal_core::schedule;

use crate::commands::view_context;
use crate::render::Render;

pub fn run(conpal: &Conpal) -> Result<()> {
    let ctx = view_context(conpal)?;

    let announcements = schedule::active_announcements(&ctx.store, ctx.now);

    if announcements.is_empty() {
        println!("{}", "No active announcements".dimmed());
        return Ok(());
    }

    for announcement in &announcements {
        println!("{}", announcement.render());
    }

    Ok(())
}
