use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::datekey::date_key;
use crate::model::short_id;
use crate::render::Renderer;
use crate::stats::habit_streak;
use crate::store::Store;

use super::{habit_title, resolve_habit, split_leading_date};

#[instrument(skip(store, renderer, args))]
pub(super) fn cmd_habit(
    store: &mut Store,
    renderer: &mut Renderer,
    args: &[String],
    today: NaiveDate,
) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        Some("add") => cmd_habit_add(store, &args[1..]),
        Some("done") => cmd_habit_set_done(store, &args[1..], today, true),
        Some("undone") => cmd_habit_set_done(store, &args[1..], today, false),
        Some("delete") => cmd_habit_delete(store, &args[1..]),
        Some("list") | None => cmd_habit_list(store, renderer, today),
        Some(other) => Err(anyhow!("unknown habit action: {other}")),
    }
}

#[instrument(skip(store, args))]
fn cmd_habit_add(store: &mut Store, args: &[String]) -> anyhow::Result<()> {
    info!("command habit add");

    let title = args.join(" ");
    if title.trim().is_empty() {
        return Err(anyhow!("habit title cannot be empty"));
    }

    let id = store.add_habit(&title);
    println!("Added habit {} '{}'.", short_id(id), title.trim());
    Ok(())
}

#[instrument(skip(store, args))]
fn cmd_habit_set_done(
    store: &mut Store,
    args: &[String],
    today: NaiveDate,
    done: bool,
) -> anyhow::Result<()> {
    info!(done, "command habit done");

    let (date, rest) = split_leading_date(args, today);
    let selector = rest.join(" ");
    let id = resolve_habit(store, &selector)?;
    store.set_habit_done(id, date, done);

    let title = habit_title(store, id);
    if done {
        let streak = habit_streak(&store.habit_log, id, today);
        println!("Ticked '{title}' for {} (streak {streak}).", date_key(date));
    } else {
        println!("Unticked '{title}' for {}.", date_key(date));
    }
    Ok(())
}

#[instrument(skip(store, args))]
fn cmd_habit_delete(store: &mut Store, args: &[String]) -> anyhow::Result<()> {
    info!("command habit delete");

    let selector = args.join(" ");
    let id = resolve_habit(store, &selector)?;
    let title = habit_title(store, id);
    store.delete_habit(id);

    println!("Deleted habit '{title}' and its log entries.");
    Ok(())
}

#[instrument(skip(store, renderer))]
pub(super) fn cmd_habit_list(
    store: &Store,
    renderer: &mut Renderer,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command habits");
    renderer.print_habit_list(store, today)
}
