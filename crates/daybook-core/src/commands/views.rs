use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::quote::quote_of_the_day;
use crate::render::Renderer;
use crate::stats::today_summary;
use crate::store::Store;

#[instrument(skip(store, renderer))]
pub(super) fn cmd_week(
    store: &Store,
    renderer: &mut Renderer,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command week");
    renderer.print_week_board(store, today)
}

#[instrument(skip(store, renderer))]
pub(super) fn cmd_today(
    store: &Store,
    renderer: &mut Renderer,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command today");

    println!("{}", quote_of_the_day(store.storage(), today));
    println!();

    let summary = today_summary(&store.tasks, &store.habits, &store.habit_log, today);
    renderer.print_today_summary(&summary)?;
    println!();

    renderer.print_habit_list(store, today)
}

#[instrument(skip(store, renderer, args))]
pub(super) fn cmd_stats(
    store: &Store,
    renderer: &mut Renderer,
    args: &[String],
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command stats");

    match args.first().map(String::as_str) {
        Some("week") => renderer.print_week_stats(store, today)?,
        Some("month") => renderer.print_month_stats(store, today)?,
        None => {
            renderer.print_week_stats(store, today)?;
            println!();
            renderer.print_month_stats(store, today)?;
        }
        Some(other) => return Err(anyhow!("unknown stats scope: {other}")),
    }

    println!();
    renderer.print_overall_streak(store, today)
}

#[instrument(skip(store))]
pub(super) fn cmd_quote(store: &Store, today: NaiveDate) -> anyhow::Result<()> {
    info!("command quote");
    println!("{}", quote_of_the_day(store.storage(), today));
    Ok(())
}
