mod client;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use conpal_core::conpal::Conpal;

#[derive(Parser)]
#[command(name = "conpal")]
#[command(about = "Browse your convention schedule and export favorites to your calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest schedule snapshot from the content API
    Fetch,
    /// Events happening right now
    Now,
    /// Your favorites still ahead today
    Today,
    /// Browse the schedule by day, room or track
    Events {
        /// Day id or name
        #[arg(long)]
        day: Option<String>,

        /// Room id or name
        #[arg(long)]
        room: Option<String>,

        /// Track id or name
        #[arg(long)]
        track: Option<String>,
    },
    /// Events starting within the next 30 minutes
    Upcoming,
    /// Currently valid announcements
    Announcements,
    /// Dealers' den listing
    Dealers {
        /// Only show favorited dealers
        #[arg(long)]
        favorites: bool,
    },
    /// Browseable venue maps and their links
    Maps,
    /// Mark an event as favorite
    Favorite { event_id: String },
    /// Remove an event from your favorites
    Unfavorite { event_id: String },
    /// Hide an event from all listings
    Hide { event_id: String },
    /// Unhide a hidden event
    Unhide { event_id: String },
    /// Unhide all hidden events
    UnhideAll,
    /// Record that you viewed an event's details
    Viewed { event_id: String },
    /// Mark a dealer as favorite
    FavoriteDealer { dealer_id: String },
    /// Remove a dealer from your favorites
    UnfavoriteDealer { dealer_id: String },
    /// Favorites that changed since you last opened them
    Updates,
    /// Export an event to the calendar directory
    Export {
        event_id: String,

        /// Keep the exported entry in sync with upstream changes
        /// (defaults to on for favorites)
        #[arg(long)]
        auto_update: Option<bool>,
    },
    /// Remove a previously exported event from the calendar
    Unexport { event_id: String },
    /// List exported events
    Exports,
    /// Push upstream changes to auto-updating calendar entries
    SyncCalendar,
    /// Control the simulated clock (debug)
    Travel {
        #[command(subcommand)]
        command: TravelCommands,
    },
}

#[derive(Subcommand)]
enum TravelCommands {
    /// Move the simulated clock forward (e.g. "1h 30m")
    Forward { duration: Vec<String> },
    /// Move the simulated clock backward
    Backward { duration: Vec<String> },
    /// Aim the simulated clock at a date/time in the venue zone
    To { date: Vec<String> },
    /// Clear the offset and disable time travel
    Reset,
    /// Disable time travel but keep the configured offset
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let conpal = Conpal::load()?;

    match cli.command {
        Commands::Fetch => commands::fetch::run(&conpal).await,
        Commands::Now => commands::now::run(&conpal),
        Commands::Today => commands::today::run(&conpal),
        Commands::Events { day, room, track } => {
            commands::events::run(&conpal, day.as_deref(), room.as_deref(), track.as_deref())
        }
        Commands::Upcoming => commands::upcoming::run(&conpal),
        Commands::Announcements => commands::announcements::run(&conpal),
        Commands::Dealers { favorites } => commands::dealers::run(&conpal, favorites),
        Commands::Maps => commands::maps::run(&conpal),
        Commands::Favorite { event_id } => commands::favorites::favorite(&conpal, &event_id),
        Commands::Unfavorite { event_id } => commands::favorites::unfavorite(&conpal, &event_id),
        Commands::Hide { event_id } => commands::favorites::hide(&conpal, &event_id),
        Commands::Unhide { event_id } => commands::favorites::unhide(&conpal, &event_id),
        Commands::UnhideAll => commands::favorites::unhide_all(&conpal),
        Commands::Viewed { event_id } => commands::favorites::viewed(&conpal, &event_id),
        Commands::FavoriteDealer { dealer_id } => {
            commands::favorites::favorite_dealer(&conpal, &dealer_id)
        }
        Commands::UnfavoriteDealer { dealer_id } => {
            commands::favorites::unfavorite_dealer(&conpal, &dealer_id)
        }
        Commands::Updates => commands::updates::run(&conpal),
        Commands::Export {
            event_id,
            auto_update,
        } => commands::export::export(&conpal, &event_id, auto_update),
        Commands::Unexport { event_id } => commands::export::unexport(&conpal, &event_id),
        Commands::Exports => commands::export::list(&conpal),
        Commands::SyncCalendar => commands::export::sync_calendar(&conpal),
        Commands::Travel { command } => match command {
            TravelCommands::Forward { duration } => {
                commands::travel::forward(&conpal, &duration.join(" "))
            }
            TravelCommands::Backward { duration } => {
                commands::travel::backward(&conpal, &duration.join(" "))
            }
            TravelCommands::To { date } => commands::travel::to(&conpal, &date.join(" ")),
            TravelCommands::Reset => commands::travel::reset(&conpal),
            TravelCommands::Off => commands::travel::off(&conpal),
        },
    }
}
