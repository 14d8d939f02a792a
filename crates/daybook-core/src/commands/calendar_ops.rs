use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::datekey::{date_key, month_start};
use crate::model::short_id;
use crate::render::Renderer;
use crate::store::Store;

use super::{resolve_event, split_leading_date};

#[instrument(skip(store, renderer, args))]
pub(super) fn cmd_event(
    store: &mut Store,
    renderer: &mut Renderer,
    args: &[String],
    today: NaiveDate,
) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        Some("add") => cmd_event_add(store, &args[1..], today),
        Some("delete") => cmd_event_delete(store, &args[1..]),
        Some("list") => cmd_event_list(store, renderer, &args[1..], today),
        None => cmd_event_list(store, renderer, &[], today),
        Some(other) => Err(anyhow!("unknown event action: {other}")),
    }
}

#[instrument(skip(store, args))]
fn cmd_event_add(store: &mut Store, args: &[String], today: NaiveDate) -> anyhow::Result<()> {
    info!("command event add");

    let (date, rest) = split_leading_date(args, today);
    let title = rest.join(" ");
    if title.trim().is_empty() {
        return Err(anyhow!("event title cannot be empty"));
    }

    let id = store.add_event(date, &title);
    println!("Added event {} on {}.", short_id(id), date_key(date));
    Ok(())
}

#[instrument(skip(store, args))]
fn cmd_event_delete(store: &mut Store, args: &[String]) -> anyhow::Result<()> {
    info!("command event delete");

    let selector = args.first().ok_or_else(|| anyhow!("expected an event id"))?;
    let id = resolve_event(store, selector)?;
    store.delete_event(id);

    println!("Deleted event {}.", short_id(id));
    Ok(())
}

#[instrument(skip(store, renderer, args))]
pub(super) fn cmd_event_list(
    store: &Store,
    renderer: &mut Renderer,
    args: &[String],
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command events");

    let month_first = parse_month_arg(args.first(), today)?;
    renderer.print_month_calendar(store, month_first, today)
}

#[instrument(skip(store, renderer, args))]
pub(super) fn cmd_calendar(
    store: &Store,
    renderer: &mut Renderer,
    args: &[String],
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command calendar");

    let month_first = parse_month_arg(args.first(), today)?;
    renderer.print_month_calendar(store, month_first, today)
}

#[instrument(skip(store, args))]
pub(super) fn cmd_note(store: &mut Store, args: &[String], today: NaiveDate) -> anyhow::Result<()> {
    info!("command note");

    match args.first().map(String::as_str) {
        Some("set") => {
            let (date, rest) = split_leading_date(&args[1..], today);
            let text = rest.join(" ");
            if text.trim().is_empty() {
                return Err(anyhow!("note text cannot be empty; use 'note clear'"));
            }
            store.set_note(date, &text);
            println!("Saved note for {}.", date_key(date));
        }
        Some("clear") => {
            let (date, _) = split_leading_date(&args[1..], today);
            store.set_note(date, "");
            println!("Cleared note for {}.", date_key(date));
        }
        _ => {
            let (date, rest) = split_leading_date(args, today);
            if !rest.is_empty() {
                return Err(anyhow!("unknown note action: {}", rest.join(" ")));
            }
            let note = store.note_for(date);
            if note.is_empty() {
                println!("No note for {}.", date_key(date));
            } else {
                println!("{note}");
            }
        }
    }
    Ok(())
}

#[instrument(skip(store, renderer, args))]
pub(super) fn cmd_day(
    store: &Store,
    renderer: &mut Renderer,
    args: &[String],
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command day");

    let (date, rest) = split_leading_date(args, today);
    if !rest.is_empty() {
        return Err(anyhow!("unexpected arguments: {}", rest.join(" ")));
    }

    renderer.print_day_panel(store, date, today)
}

fn parse_month_arg(raw: Option<&String>, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let Some(raw) = raw else {
        return Ok(month_start(today));
    };

    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow!("expected YYYY-MM, got: {raw}"))
}
