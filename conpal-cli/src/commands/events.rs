use anyhow::Result;
use owo_colors::OwoColorize;

use conpal_core::conpal::Conpal;
use conpal_core::event::{EventDay, EventRoom, EventTrack};
use conpal_core::schedule::{self, IndexCache};

use crate::commands::{ViewContext, view_context};
use crate::render;

pub fn run(
    conpal: &Conpal,
    day: Option<&str>,
    room: Option<&str>,
    track: Option<&str>,
) -> Result<()> {
    let ctx = view_context(conpal)?;
    let mut cache = IndexCache::new();

    match (day, room, track) {
        (Some(day), _, _) => list_day(&ctx, &mut cache, day),
        (_, Some(room), _) => list_room(&ctx, &mut cache, room),
        (_, _, Some(track)) => list_track(&ctx, &mut cache, track),
        (None, None, None) => overview(&ctx, &mut cache),
    }
}

fn list_day(ctx: &ViewContext, cache: &mut IndexCache, arg: &str) -> Result<()> {
    let day = resolve(ctx.store.days(), arg, |d: &EventDay| (&d.id, &d.name), "day")?;
    let index = cache.get(&ctx.store);

    println!(
        "{} {}",
        day.name.bold(),
        render::date_label(day.date, ctx.now, ctx.zone).dimmed()
    );

    let events = schedule::events_on_day(index, &ctx.store, &ctx.aux, &day.id, ctx.now);
    print_events(ctx, events);
    Ok(())
}

fn list_room(ctx: &ViewContext, cache: &mut IndexCache, arg: &str) -> Result<()> {
    let room = resolve(ctx.store.rooms(), arg, |r: &EventRoom| (&r.id, &r.name), "room")?;
    let index = cache.get(&ctx.store);

    println!("{}", room.name.bold());

    let events = schedule::events_in_room(index, &ctx.store, &ctx.aux, &room.id, ctx.now);
    print_events(ctx, events);
    Ok(())
}

fn list_track(ctx: &ViewContext, cache: &mut IndexCache, arg: &str) -> Result<()> {
    let track = resolve(ctx.store.tracks(), arg, |t: &EventTrack| (&t.id, &t.name), "track")?;
    let index = cache.get(&ctx.store);

    println!("{}", track.name.bold());

    let events = schedule::events_on_track(index, &ctx.store, &ctx.aux, &track.id, ctx.now);
    print_events(ctx, events);
    Ok(())
}

/// No selector: show each dimension with its event counts.
fn overview(ctx: &ViewContext, cache: &mut IndexCache) -> Result<()> {
    let index = cache.get(&ctx.store);

    println!("{}", "Days".bold());
    for day in ctx.store.days() {
        println!(
            "  {} {} {}",
            render::date_label(day.date, ctx.now, ctx.zone),
            day.name,
            format!("({} events)", index.day_event_count(&day.id)).dimmed()
        );
    }

    println!("\n{}", "Rooms".bold());
    for room in ctx.store.rooms() {
        println!(
            "  {} {}",
            room.name,
            format!("({} events)", index.room_event_count(&room.id)).dimmed()
        );
    }

    println!("\n{}", "Tracks".bold());
    for track in ctx.store.tracks() {
        println!(
            "  {} {}",
            track.name,
            format!("({} events)", index.track_event_count(&track.id)).dimmed()
        );
    }

    Ok(())
}

fn print_events(ctx: &ViewContext, events: Vec<schedule::EventInstance<'_>>) {
    if events.is_empty() {
        println!("{}", "  No events".dimmed());
        return;
    }

    for instance in &events {
        println!("{}", render::event_line(instance, &ctx.store, ctx.zone));
    }
}

/// Find a dimension record by id or (case-insensitive) name.
fn resolve<'a, T>(
    items: &'a [T],
    arg: &str,
    key: impl Fn(&'a T) -> (&'a String, &'a String),
    kind: &str,
) -> Result<&'a T> {
    let found = items.iter().find(|&item| {
        let (id, name) = key(item);
        id.as_str() == arg || name.eq_ignore_ascii_case(arg)
    });

    match found {
        Some(item) => Ok(item),
        None => {
            let available: Vec<&str> = items.iter().map(|item| key(item).1.as_str()).collect();
            anyhow::bail!("{} '{}' not found. Available: {}", kind, arg, available.join(", "))
        }
    }
}
