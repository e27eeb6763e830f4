use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::conpal::Conpal;
use conpal_core::conpal_config::ConpalConfig;
use conpal_core::store::RecordStore;

use crate::client::ContentClient;
use crate::utils::tui;

pub async fn run(conpal: &Conpal) -> Result<()> {
    let Some(api_base) = conpal.api_base() else {
        anyhow::bail!(
            "No content API configured.\n\n\
            Set api_base in {}",
            ConpalConfig::config_path()?.display()
        );
    };

    let client = ContentClient::new(api_base)?;

    let spinner = tui::create_spinner("Fetching schedule...".to_string());
    let result = client.fetch_snapshot().await;
    spinner.finish_and_clear();

    let snapshot = result?;
    let store = RecordStore::from_snapshot(snapshot);
    store.save(&conpal.cache_path())?;

    println!(
        "{}",
        format!(
            "Fetched {} events, {} days, {} rooms, {} tracks, {} dealers, {} announcements",
            store.events().len(),
            store.days().len(),
            store.rooms().len(),
            store.tracks().len(),
            store.dealers().len(),
            store.announcements().len(),
        )
        .green()
    );

    Ok(())
}
