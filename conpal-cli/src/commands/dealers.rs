use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::auxiliary::AuxiliaryState;
use conpal_core::conpal::Conpal;

use crate::commands::load_schedule;

pub fn run(conpal: &Conpal, favorites_only: bool) -> Result<()> {
    let store = load_schedule(conpal)?;
    let aux = AuxiliaryState::load(&conpal.state_path())?;

    let dealers: Vec<_> = store
        .dealers()
        .iter()
        .filter(|dealer| !favorites_only || aux.is_dealer_favorite(&dealer.id))
        .collect();

    if dealers.is_empty() {
        let message = if favorites_only {
            "No favorite dealers"
        } else {
            "No dealers in the cached schedule"
        };
        println!("{}", message.dimmed());
        return Ok(());
    }

    for dealer in dealers {
        let heart = if aux.is_dealer_favorite(&dealer.id) {
            format!(" {}", "<3".red())
        } else {
            String::new()
        };

        let mut line = format!("  {}{}", dealer.full_name().bold(), heart);
        if let Some(description) = &dealer.short_description {
            line.push_str(&format!("\n    {}", description.dimmed()));
        }
        println!("{}", line);
    }

    Ok(())
}
