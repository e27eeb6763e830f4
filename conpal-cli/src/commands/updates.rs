use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::conpal::Conpal;
use conpal_core::schedule::updated_favorites;

use crate::commands::view_context;

pub fn run(conpal: &Conpal) -> Result<()> {
    let ctx = view_context(conpal)?;

    let updated = updated_favorites(&ctx.store, &ctx.aux);

    if updated.is_empty() {
        println!("{}", "No favorites changed since you last looked".dimmed());
        return Ok(());
    }

    println!("{}", "Changed favorites".bold());
    for event in &updated {
        let seen = ctx
            .aux
            .last_viewed(&event.id)
            .map(|t| t.with_timezone(&ctx.zone).format("%a %H:%M").to_string())
            .unwrap_or_default();

        println!(
            "  {} {} {}",
            "~".yellow(),
            event.title.yellow(),
            format!(
                "changed {}, seen {}",
                event.last_change.with_timezone(&ctx.zone).format("%a %H:%M"),
                seen
            )
            .dimmed()
        );
    }

    println!(
        "\n{}",
        "Run `conpal viewed <event-id>` after checking the details".dimmed()
    );

    Ok(())
}
