use std::io::{self, Write};

use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::cli::Invocation;
use crate::config::Config;
use crate::datekey::{self, parse_date_arg};
use crate::model::{Event, Habit, Task};
use crate::render::Renderer;
use crate::store::Store;

mod calendar_ops;
mod habit_ops;
mod io_ops;
mod task_ops;
mod views;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add",
        "list",
        "done",
        "undone",
        "delete",
        "habit",
        "habits",
        "event",
        "events",
        "note",
        "day",
        "week",
        "today",
        "calendar",
        "stats",
        "quote",
        "export",
        "import",
        "clear",
        "help",
        "version",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[instrument(skip(store, _cfg, renderer, inv))]
pub fn dispatch(
    store: &mut Store,
    _cfg: &Config,
    renderer: &mut Renderer,
    inv: Invocation,
) -> anyhow::Result<()> {
    let today = datekey::today();
    debug!(command = %inv.command, args = ?inv.args, "dispatching command");

    match inv.command.as_str() {
        "add" => task_ops::cmd_add(store, &inv.args, today),
        "list" => task_ops::cmd_list(store, renderer, &inv.args, today),
        "done" => task_ops::cmd_set_done(store, &inv.args, true),
        "undone" => task_ops::cmd_set_done(store, &inv.args, false),
        "delete" => task_ops::cmd_delete(store, &inv.args),
        "habit" => habit_ops::cmd_habit(store, renderer, &inv.args, today),
        "habits" => habit_ops::cmd_habit_list(store, renderer, today),
        "event" => calendar_ops::cmd_event(store, renderer, &inv.args, today),
        "events" => calendar_ops::cmd_event_list(store, renderer, &inv.args, today),
        "note" => calendar_ops::cmd_note(store, &inv.args, today),
        "day" => calendar_ops::cmd_day(store, renderer, &inv.args, today),
        "calendar" => calendar_ops::cmd_calendar(store, renderer, &inv.args, today),
        "week" => views::cmd_week(store, renderer, today),
        "today" => views::cmd_today(store, renderer, today),
        "stats" => views::cmd_stats(store, renderer, &inv.args, today),
        "quote" => views::cmd_quote(store, today),
        "export" => io_ops::cmd_export(store, &inv.args),
        "import" => io_ops::cmd_import(store, &inv.args),
        "clear" => io_ops::cmd_clear(store),
        "help" => cmd_help(),
        "version" => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}")),
    }
}

fn cmd_help() -> anyhow::Result<()> {
    println!("usage: daybook [flags] <command> [args]");
    println!();
    println!("  add [date] <title…>        add a task (🎯 marks priority, #tags categorize)");
    println!("  list [date|all]            task table");
    println!("  done/undone <id>           toggle a task by id prefix");
    println!("  delete <id>                remove a task");
    println!("  habit add <title…>         add a habit");
    println!("  habit done [date] <habit>  tick a habit (name or id prefix)");
    println!("  habit undone [date] <habit>");
    println!("  habit delete <habit>       remove a habit and its log entries");
    println!("  habits                     habit list with streaks");
    println!("  event add [date] <title…>  add a calendar event");
    println!("  event delete <id>");
    println!("  events [YYYY-MM]           month calendar and events");
    println!("  note [date]                show a daily note");
    println!("  note set [date] <text…>    write a daily note");
    println!("  note clear [date]");
    println!("  day [date]                 events, note and tasks for one day");
    println!("  week                       week board");
    println!("  today                      quote, summary and habits for today");
    println!("  calendar [YYYY-MM]         month calendar");
    println!("  stats [week|month]         charts, completion gauges and streaks");
    println!("  quote                      quote of the day");
    println!("  export [path]              write a merged backup (stdout by default)");
    println!("  import <path|->            load a backup (stdin with '-')");
    println!("  clear                      wipe all collections (asks first)");
    println!();
    println!("  dates: YYYY-MM-DD, today, yesterday, tomorrow");
    Ok(())
}

/// Consume a leading date argument if one parses; everything else is left
/// for the command.
fn split_leading_date(args: &[String], today: NaiveDate) -> (NaiveDate, &[String]) {
    match args.first() {
        Some(raw) => match parse_date_arg(raw, today) {
            Ok(date) => (date, &args[1..]),
            Err(_) => (today, args),
        },
        None => (today, args),
    }
}

fn id_matches(id: Uuid, needle: &str) -> bool {
    id.simple().to_string().starts_with(needle)
}

fn normalize_selector(selector: &str) -> String {
    selector.trim().to_ascii_lowercase().replace('-', "")
}

fn resolve_task(store: &Store, selector: &str) -> anyhow::Result<Uuid> {
    let needle = normalize_selector(selector);
    if needle.is_empty() {
        return Err(anyhow!("expected a task id"));
    }

    let matches: Vec<&Task> = store
        .tasks
        .iter()
        .filter(|t| id_matches(t.id, &needle))
        .collect();
    match matches.as_slice() {
        [] => Err(anyhow!("no task matches id: {selector}")),
        [task] => Ok(task.id),
        _ => Err(anyhow!("ambiguous task id: {selector}")),
    }
}

fn resolve_event(store: &Store, selector: &str) -> anyhow::Result<Uuid> {
    let needle = normalize_selector(selector);
    if needle.is_empty() {
        return Err(anyhow!("expected an event id"));
    }

    let matches: Vec<&Event> = store
        .events
        .iter()
        .filter(|e| id_matches(e.id, &needle))
        .collect();
    match matches.as_slice() {
        [] => Err(anyhow!("no event matches id: {selector}")),
        [event] => Ok(event.id),
        _ => Err(anyhow!("ambiguous event id: {selector}")),
    }
}

/// Habits are addressable by case-insensitive title or by id prefix.
fn resolve_habit(store: &Store, selector: &str) -> anyhow::Result<Uuid> {
    let raw = selector.trim();
    if raw.is_empty() {
        return Err(anyhow!("expected a habit name or id"));
    }

    let by_title: Vec<&Habit> = store
        .habits
        .iter()
        .filter(|h| h.title.eq_ignore_ascii_case(raw))
        .collect();
    if let [habit] = by_title.as_slice() {
        return Ok(habit.id);
    }

    let needle = normalize_selector(raw);
    let by_id: Vec<&Habit> = store
        .habits
        .iter()
        .filter(|h| id_matches(h.id, &needle))
        .collect();
    match by_id.as_slice() {
        [] => Err(anyhow!("no habit matches: {selector}")),
        [habit] => Ok(habit.id),
        _ => Err(anyhow!("ambiguous habit: {selector}")),
    }
}

fn habit_title(store: &Store, id: Uuid) -> String {
    store
        .habits
        .iter()
        .find(|h| h.id == id)
        .map(|h| h.title.clone())
        .unwrap_or_else(|| crate::model::short_id(id))
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} (y/N): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::{expand_command_abbrev, known_command_names};

    #[test]
    fn abbreviations_expand_when_unique() {
        let known = known_command_names();
        assert_eq!(expand_command_abbrev("st", &known), Some("stats"));
        assert_eq!(expand_command_abbrev("exp", &known), Some("export"));
        assert_eq!(expand_command_abbrev("week", &known), Some("week"));
    }

    #[test]
    fn ambiguous_or_unknown_abbreviations_fail() {
        let known = known_command_names();
        // "habit" and "habits" (and "help") share the prefix.
        assert_eq!(expand_command_abbrev("h", &known), None);
        assert_eq!(expand_command_abbrev("frobnicate", &known), None);
        // An exact name wins over its extensions.
        assert_eq!(expand_command_abbrev("habit", &known), Some("habit"));
    }
}
