use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::datekey::{date_key, parse_date_arg};
use crate::model::{short_id, Task};
use crate::render::Renderer;
use crate::store::Store;

use super::{resolve_task, split_leading_date};

#[instrument(skip(store, args))]
pub(super) fn cmd_add(store: &mut Store, args: &[String], today: NaiveDate) -> anyhow::Result<()> {
    info!("command add");

    let (date, rest) = split_leading_date(args, today);
    let title = rest.join(" ");
    if title.trim().is_empty() {
        return Err(anyhow!("task title cannot be empty"));
    }

    let id = store.add_task(date, &title);
    println!("Created task {} for {}.", short_id(id), date_key(date));
    Ok(())
}

#[instrument(skip(store, renderer, args))]
pub(super) fn cmd_list(
    store: &Store,
    renderer: &mut Renderer,
    args: &[String],
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command list");

    let mut tasks: Vec<&Task> = match args.first().map(String::as_str) {
        Some("all") => store.tasks.iter().collect(),
        Some(raw) => store.tasks_for(parse_date_arg(raw, today)?),
        None => store.tasks_for(today),
    };
    tasks.sort_by_key(|t| t.date);

    renderer.print_task_table(&tasks)
}

#[instrument(skip(store, args))]
pub(super) fn cmd_set_done(store: &mut Store, args: &[String], done: bool) -> anyhow::Result<()> {
    info!(done, "command done");

    let selector = args.first().ok_or_else(|| anyhow!("expected a task id"))?;
    let id = resolve_task(store, selector)?;
    store.set_task_done(id, done);

    let state = if done { "done" } else { "not done" };
    println!("Marked task {} {state}.", short_id(id));
    Ok(())
}

#[instrument(skip(store, args))]
pub(super) fn cmd_delete(store: &mut Store, args: &[String]) -> anyhow::Result<()> {
    info!("command delete");

    let selector = args.first().ok_or_else(|| anyhow!("expected a task id"))?;
    let id = resolve_task(store, selector)?;
    store.delete_task(id);

    println!("Deleted task {}.", short_id(id));
    Ok(())
}
