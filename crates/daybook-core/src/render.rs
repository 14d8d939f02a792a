use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use chrono::{Datelike, NaiveDate};
use unicode_width::UnicodeWidthStr;

use crate::chart;
use crate::config::Config;
use crate::datekey::{date_key, week_dates};
use crate::model::{short_id, Task};
use crate::stats::{
    completed_per_day, day_progress, habit_streak, month_completion, overall_streak,
    trailing_week_buckets, week_completion, TodaySummary,
};
use crate::store::Store;
use crate::title::parse_title;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEK_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

const CHART_HEIGHT: usize = 8;
const GAUGE_WIDTH: usize = 20;

/// Prints full views from a store snapshot. Every view regenerates its
/// whole output; nothing is patched incrementally.
#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn print_task_table(&mut self, tasks: &[&Task]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        if tasks.is_empty() {
            writeln!(out, "No tasks.")?;
            return Ok(());
        }

        let headers = ["ID", "Date", "Done", "Title", "Tags"];
        let mut rows = Vec::with_capacity(tasks.len());

        for task in tasks {
            let meta = parse_title(&task.title);
            let title = if meta.base_title.is_empty() {
                task.title.clone()
            } else {
                meta.base_title
            };

            let mut tags = Vec::new();
            if meta.priority {
                tags.push("🎯".to_string());
            }
            tags.extend(meta.tags);

            rows.push(vec![
                self.paint(&short_id(task.id), "33"),
                date_key(task.date),
                checkbox(task.done).to_string(),
                title,
                tags.join(" "),
            ]);
        }

        write_table(&mut out, &headers, rows)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_week_board(&mut self, store: &Store, today: NaiveDate) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "{}", today.format("%A, %Y %b %d"))?;
        writeln!(out)?;

        for (index, date) in week_dates(today).iter().enumerate() {
            let is_past = *date < today;
            let is_today = *date == today;
            let is_future = *date > today;

            let mut header = format!("{:<9} {}", DAY_NAMES[index], date.format("%d %b"));
            if is_today {
                header.push_str(&self.paint("  ── Today", "32"));
            }
            writeln!(out, "{header}")?;

            let tasks = store.tasks_for(*date);
            let progress = day_progress(&store.tasks, *date, today);

            if tasks.is_empty() {
                let empty = if is_past {
                    "No tasks recorded."
                } else if is_future {
                    "No tasks planned yet."
                } else {
                    "No tasks yet."
                };
                writeln!(out, "  {empty}")?;
                writeln!(out)?;
                continue;
            }

            if is_future {
                writeln!(out, "  {} planned", tasks.len())?;
            } else {
                writeln!(
                    out,
                    "  {}",
                    chart::gauge(progress.done, progress.total, GAUGE_WIDTH)
                )?;
            }

            for task in tasks {
                writeln!(out, "  {}", self.task_row(task))?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_habit_list(&mut self, store: &Store, today: NaiveDate) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        if store.habits.is_empty() {
            writeln!(out, "No habits yet.")?;
        } else {
            for habit in &store.habits {
                let meta = parse_title(&habit.title);
                let title = if meta.base_title.is_empty() {
                    habit.title.clone()
                } else {
                    meta.base_title.clone()
                };

                let mut row = format!(
                    "{} {} {}",
                    checkbox(store.habit_done_on(habit.id, today)),
                    self.paint(&short_id(habit.id), "33"),
                    title
                );

                let streak = habit_streak(&store.habit_log, habit.id, today);
                if streak > 0 {
                    row.push_str(&format!("  🔥 {streak}"));
                }
                if meta.priority {
                    row.push_str("  🎯");
                }
                for tag in &meta.tags {
                    row.push_str(&format!("  {tag}"));
                }
                writeln!(out, "{row}")?;
            }
        }

        writeln!(out)?;
        self.write_overall_streak(&mut out, store, today)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, summary))]
    pub fn print_today_summary(&mut self, summary: &TodaySummary) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        if summary.is_empty() {
            writeln!(out, "Nothing completed yet.")?;
            return Ok(());
        }

        let mut line = format!(
            "Habits: {}/{} · Tasks: {}/{} · Total: {}",
            summary.habits_done,
            summary.habits_total,
            summary.tasks_done,
            summary.tasks_total,
            summary.total_completed()
        );
        if summary.priority_done > 0 {
            line.push_str(&format!(" · 🎯 {}", summary.priority_done));
        }
        writeln!(out, "{line}")?;

        if summary.tags.is_empty() {
            writeln!(out, "No tagged activity today.")?;
        } else {
            for tag in summary.tags.iter().take(6) {
                writeln!(out, "  {} · {}", tag.label, tag.count)?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_month_calendar(
        &mut self,
        store: &Store,
        month_first: NaiveDate,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "{}", month_first.format("%Y / %m"))?;
        for name in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
            write!(out, "{name:>3} ")?;
        }
        writeln!(out)?;

        let leading = month_first.weekday().num_days_from_sunday() as usize;
        let mut column = leading;
        write!(out, "{}", "    ".repeat(leading))?;

        for day in 1..=days_in_month(month_first) {
            let Some(date) = month_first.with_day(day) else {
                continue;
            };
            let mark = if store.events.iter().any(|e| e.date == date) {
                '*'
            } else {
                ' '
            };

            let cell = format!("{day:>3}");
            let cell = if date == today {
                self.paint(&cell, "7")
            } else {
                cell
            };
            write!(out, "{cell}{mark}")?;

            column += 1;
            if column % 7 == 0 {
                writeln!(out)?;
            }
        }
        if column % 7 != 0 {
            writeln!(out)?;
        }
        writeln!(out)?;

        let mut month_events: Vec<_> = store
            .events
            .iter()
            .filter(|e| e.date.year() == month_first.year() && e.date.month() == month_first.month())
            .collect();
        month_events.sort_by_key(|e| e.date);

        if month_events.is_empty() {
            writeln!(out, "No events this month.")?;
        } else {
            for event in month_events {
                writeln!(
                    out,
                    "{}  {}  ({})",
                    date_key(event.date),
                    event.title,
                    self.paint(&short_id(event.id), "33")
                )?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_day_panel(
        &mut self,
        store: &Store,
        date: NaiveDate,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let mut heading = date.format("%a, %Y %b %d").to_string();
        if date == today {
            heading.push_str(&self.paint("  ── Today", "32"));
        }
        writeln!(out, "{heading}")?;
        writeln!(out)?;

        let events = store.events_for(date);
        if events.is_empty() {
            writeln!(out, "No events.")?;
        } else {
            for event in events {
                writeln!(
                    out,
                    "• {}  ({})",
                    event.title,
                    self.paint(&short_id(event.id), "33")
                )?;
            }
        }
        writeln!(out)?;

        let note = store.note_for(date);
        if note.is_empty() {
            writeln!(out, "No note.")?;
        } else {
            writeln!(out, "Note: {note}")?;
        }
        writeln!(out)?;

        let tasks = store.tasks_for(date);
        if tasks.is_empty() {
            writeln!(out, "No tasks.")?;
        } else {
            for task in tasks {
                writeln!(out, "{}", self.task_row(task))?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_week_stats(&mut self, store: &Store, today: NaiveDate) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let week = week_dates(today);
        let values = completed_per_day(&store.tasks, &week);
        let total: u64 = values.iter().sum();

        let labels: Vec<String> = WEEK_LABELS.iter().map(|l| l.to_string()).collect();
        let labels = if total == 0 { Vec::new() } else { labels };

        writeln!(out, "This week")?;
        write!(
            out,
            "{}",
            chart::bar_chart(
                &labels,
                &values,
                CHART_HEIGHT,
                5,
                "No completed tasks this week yet."
            )
        )?;

        if total > 0 {
            writeln!(
                out,
                "{total} task{} completed this week.",
                plural_s(total as usize)
            )?;
        }

        let completion = week_completion(&store.tasks, today);
        writeln!(out, "{}", chart::gauge(completion.done, completion.total, GAUGE_WIDTH))?;
        if completion.is_empty() {
            writeln!(out, "No tasks yet this week.")?;
        } else {
            writeln!(
                out,
                "{}/{} tasks ({}%).",
                completion.done,
                completion.total,
                completion.percent()
            )?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_month_stats(&mut self, store: &Store, today: NaiveDate) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let buckets = trailing_week_buckets(&store.tasks, today);
        let values: Vec<u64> = buckets.iter().map(|b| b.completed).collect();
        let total: u64 = values.iter().sum();

        let labels: Vec<String> = buckets.iter().map(|b| b.label.clone()).collect();
        let labels = if total == 0 { Vec::new() } else { labels };

        writeln!(out, "Last 4 weeks")?;
        write!(
            out,
            "{}",
            chart::bar_chart(
                &labels,
                &values,
                CHART_HEIGHT,
                9,
                "No completed tasks in last 4 weeks."
            )
        )?;

        if total > 0 {
            writeln!(
                out,
                "{total} task{} completed in the last 4 weeks.",
                plural_s(total as usize)
            )?;
        }

        let completion = month_completion(&store.tasks, today);
        writeln!(out, "{}", chart::gauge(completion.done, completion.total, GAUGE_WIDTH))?;
        if completion.is_empty() {
            writeln!(out, "No tasks yet this month.")?;
        } else {
            writeln!(
                out,
                "{}/{} tasks ({}%).",
                completion.done,
                completion.total,
                completion.percent()
            )?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, store))]
    pub fn print_overall_streak(&mut self, store: &Store, today: NaiveDate) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_overall_streak(&mut out, store, today)
    }

    fn write_overall_streak<W: Write>(
        &mut self,
        out: &mut W,
        store: &Store,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        let overall = overall_streak(&store.habit_log, today);
        if overall == 0 {
            writeln!(out, "No streak yet. Start by ticking a habit today.")?;
        } else {
            writeln!(
                out,
                "Overall streak: {overall} day{} 🔥",
                plural_s(overall as usize)
            )?;
        }
        Ok(())
    }

    fn task_row(&self, task: &Task) -> String {
        let meta = parse_title(&task.title);
        let title = if meta.base_title.is_empty() {
            task.title.clone()
        } else {
            meta.base_title.clone()
        };

        let mut row = format!(
            "{} {} {}",
            checkbox(task.done),
            self.paint(&short_id(task.id), "33"),
            title
        );
        if meta.priority {
            row.push_str("  🎯");
        }
        for tag in &meta.tags {
            row.push_str(&format!("  {tag}"));
        }
        row
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn days_in_month(month_first: NaiveDate) -> u32 {
    let (year, month) = (month_first.year(), month_first.month());
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_first
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn write_table<W: Write>(
    mut writer: W,
    headers: &[&str],
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(*header));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
