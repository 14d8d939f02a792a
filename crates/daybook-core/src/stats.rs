use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::datekey::{month_start, start_of_week};
use crate::model::{Habit, HabitLog, Task};
use crate::title::parse_title;

/// Streaks longer than a year report as 365.
pub const STREAK_CAP: u32 = 365;

/// Consecutive days ending today on which the habit was ticked.
#[must_use]
pub fn habit_streak(log: &HabitLog, habit: Uuid, today: NaiveDate) -> u32 {
    walk_back(today, |day| {
        log.get(&day).is_some_and(|row| row.contains(&habit))
    })
}

/// Consecutive days ending today on which any habit was ticked.
#[must_use]
pub fn overall_streak(log: &HabitLog, today: NaiveDate) -> u32 {
    walk_back(today, |day| log.get(&day).is_some_and(|row| !row.is_empty()))
}

fn walk_back<F: Fn(NaiveDate) -> bool>(today: NaiveDate, hit: F) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while streak < STREAK_CAP {
        if !hit(day) {
            break;
        }
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Done/total counts over some slice of tasks. Ratio is 0 when empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    pub done: usize,
    pub total: usize,
}

impl Completion {
    #[must_use]
    pub fn percent(self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.done as f64 / self.total as f64) * 100.0).round() as u32
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.total == 0
    }
}

/// Done-task count for each of the given days, in order.
#[must_use]
pub fn completed_per_day(tasks: &[Task], days: &[NaiveDate]) -> Vec<u64> {
    days.iter()
        .map(|day| tasks.iter().filter(|t| t.date == *day && t.done).count() as u64)
        .collect()
}

/// One of the 4 trailing 7-day windows of the monthly view.
#[derive(Debug, Clone)]
pub struct WeekBucket {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub completed: u64,
}

/// Four trailing 7-day windows ending on the current week, oldest first.
/// The monthly chart buckets by these windows, not by calendar month.
#[must_use]
pub fn trailing_week_buckets(tasks: &[Task], today: NaiveDate) -> Vec<WeekBucket> {
    let current = start_of_week(today);
    (0..4)
        .rev()
        .map(|offset| {
            let start = current - Duration::days(offset * 7);
            let end = start + Duration::days(6);
            let completed = tasks
                .iter()
                .filter(|t| t.done && t.date >= start && t.date <= end)
                .count() as u64;
            let label = if offset == 0 {
                "This wk".to_string()
            } else {
                format!("W-{offset}")
            };
            WeekBucket {
                label,
                start,
                end,
                completed,
            }
        })
        .collect()
}

/// Completion over the inclusive date range `start..=end`.
#[must_use]
pub fn completion_between(tasks: &[Task], start: NaiveDate, end: NaiveDate) -> Completion {
    let mut completion = Completion::default();
    for task in tasks {
        if task.date >= start && task.date <= end {
            completion.total += 1;
            if task.done {
                completion.done += 1;
            }
        }
    }
    completion
}

/// Completion from the start of the current week through today.
#[must_use]
pub fn week_completion(tasks: &[Task], today: NaiveDate) -> Completion {
    completion_between(tasks, start_of_week(today), today)
}

/// Completion from the first of the month through today.
#[must_use]
pub fn month_completion(tasks: &[Task], today: NaiveDate) -> Completion {
    completion_between(tasks, month_start(today), today)
}

/// Completion for a single day of the week board. Future days report an
/// empty completion: they are planned, not in progress.
#[must_use]
pub fn day_progress(tasks: &[Task], date: NaiveDate, today: NaiveDate) -> Completion {
    if date > today {
        return Completion::default();
    }
    completion_between(tasks, date, date)
}

/// A tag and how often it occurred, display label from first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub label: String,
    pub count: usize,
}

/// What got done today: habit and task counts, priority completions and
/// case-insensitive tag counts across everything completed.
#[derive(Debug, Clone, Default)]
pub struct TodaySummary {
    pub habits_done: usize,
    pub habits_total: usize,
    pub tasks_done: usize,
    pub tasks_total: usize,
    pub priority_done: usize,
    pub tags: Vec<TagCount>,
}

impl TodaySummary {
    #[must_use]
    pub fn total_completed(&self) -> usize {
        self.habits_done + self.tasks_done
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.habits_total == 0 && self.tasks_total == 0
    }
}

#[must_use]
pub fn today_summary(
    tasks: &[Task],
    habits: &[Habit],
    log: &HabitLog,
    today: NaiveDate,
) -> TodaySummary {
    let done_row = log.get(&today);
    let habits_done: Vec<&Habit> = habits
        .iter()
        .filter(|h| done_row.is_some_and(|row| row.contains(&h.id)))
        .collect();
    let tasks_today: Vec<&Task> = tasks.iter().filter(|t| t.date == today).collect();
    let tasks_done: Vec<&Task> = tasks_today.iter().copied().filter(|t| t.done).collect();

    let mut summary = TodaySummary {
        habits_done: habits_done.len(),
        habits_total: habits.len(),
        tasks_done: tasks_done.len(),
        tasks_total: tasks_today.len(),
        priority_done: 0,
        tags: Vec::new(),
    };

    let completed_titles = habits_done
        .iter()
        .map(|h| h.title.as_str())
        .chain(tasks_done.iter().map(|t| t.title.as_str()));

    let mut counts: Vec<TagCount> = Vec::new();
    for title in completed_titles {
        let meta = parse_title(title);
        if meta.priority {
            summary.priority_done += 1;
        }
        for tag in meta.tags {
            let position = counts
                .iter()
                .position(|c| c.label.to_lowercase() == tag.to_lowercase());
            match position {
                Some(index) => counts[index].count += 1,
                None => counts.push(TagCount {
                    label: tag,
                    count: 1,
                }),
            }
        }
    }

    // stable sort keeps first-occurrence order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    summary.tags = counts;
    summary
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{Duration, NaiveDate};
    use uuid::Uuid;

    use super::{
        completed_per_day, day_progress, habit_streak, overall_streak, today_summary,
        trailing_week_buckets, week_completion, STREAK_CAP,
    };
    use crate::datekey::week_dates;
    use crate::model::{Habit, HabitLog, Task};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn log_days(habit: Uuid, days: &[NaiveDate]) -> HabitLog {
        let mut log = HabitLog::new();
        for date in days {
            log.entry(*date).or_insert_with(BTreeSet::new).insert(habit);
        }
        log
    }

    fn done_task(date: NaiveDate, title: &str) -> Task {
        let mut task = Task::new(date, title.to_string());
        task.done = true;
        task
    }

    #[test]
    fn full_week_streak_is_seven() {
        let habit = Uuid::new_v4();
        let today = day(2024, 5, 4);
        let days: Vec<NaiveDate> = (0..7).map(|i| today - Duration::days(i)).collect();
        let log = log_days(habit, &days);

        assert_eq!(habit_streak(&log, habit, today), 7);
        assert_eq!(overall_streak(&log, today), 7);
    }

    #[test]
    fn streak_stops_at_first_missing_day() {
        let habit = Uuid::new_v4();
        let today = day(2024, 5, 4);
        // Logged today, yesterday, and four days ago: the gap wins.
        let log = log_days(
            habit,
            &[today, today - Duration::days(1), today - Duration::days(4)],
        );

        assert_eq!(habit_streak(&log, habit, today), 2);
    }

    #[test]
    fn missed_today_resets_to_zero() {
        let habit = Uuid::new_v4();
        let today = day(2024, 5, 4);
        let log = log_days(habit, &[today - Duration::days(1)]);

        assert_eq!(habit_streak(&log, habit, today), 0);
        assert_eq!(overall_streak(&log, today), 0);
    }

    #[test]
    fn streak_caps_at_a_year() {
        let habit = Uuid::new_v4();
        let today = day(2024, 5, 4);
        let days: Vec<NaiveDate> = (0..400).map(|i| today - Duration::days(i)).collect();
        let log = log_days(habit, &days);

        assert_eq!(habit_streak(&log, habit, today), STREAK_CAP);
    }

    #[test]
    fn streak_ignores_other_habits() {
        let habit = Uuid::new_v4();
        let other = Uuid::new_v4();
        let today = day(2024, 5, 4);
        let mut log = log_days(habit, &[today]);
        log.entry(today - Duration::days(1))
            .or_default()
            .insert(other);

        assert_eq!(habit_streak(&log, habit, today), 1);
        // Overall streak counts any habit.
        assert_eq!(overall_streak(&log, today), 2);
    }

    #[test]
    fn weekly_counts_and_completion_ratio() {
        let today = day(2024, 5, 1); // Wednesday
        let week = week_dates(today);

        let mut tasks = vec![
            done_task(week[0], "a"),
            done_task(week[0], "b"),
            done_task(week[2], "c"),
        ];
        tasks.push(Task::new(week[1], "open".to_string()));
        tasks.push(Task::new(week[3], "open too".to_string()));

        assert_eq!(completed_per_day(&tasks, &week), vec![2, 0, 1, 0, 0, 0, 0]);

        let completion = week_completion(&tasks, today);
        assert_eq!(completion.done, 3);
        assert_eq!(completion.total, 5);
        assert_eq!(completion.percent(), 60);
    }

    #[test]
    fn empty_range_has_zero_percent() {
        let completion = week_completion(&[], day(2024, 5, 1));
        assert!(completion.is_empty());
        assert_eq!(completion.percent(), 0);
    }

    #[test]
    fn trailing_buckets_cover_four_weeks() {
        let today = day(2024, 5, 1);
        let tasks = vec![
            done_task(day(2024, 4, 10), "three weeks back"),
            done_task(day(2024, 4, 29), "this week"),
            done_task(day(2024, 3, 1), "too old"),
        ];

        let buckets = trailing_week_buckets(&tasks, today);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].label, "W-3");
        assert_eq!(buckets[3].label, "This wk");
        assert_eq!(buckets[0].completed, 1);
        assert_eq!(buckets[3].completed, 1);
        assert_eq!(buckets[1].completed + buckets[2].completed, 0);
        // Windows tile without gaps.
        for pair in buckets.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + Duration::days(1));
        }
    }

    #[test]
    fn future_days_report_no_progress() {
        let today = day(2024, 5, 1);
        let tomorrow = day(2024, 5, 2);
        let tasks = vec![done_task(tomorrow, "planned and somehow done")];

        assert!(day_progress(&tasks, tomorrow, today).is_empty());
        assert_eq!(day_progress(&tasks, tomorrow, tomorrow).done, 1);
    }

    #[test]
    fn summary_counts_tags_case_insensitively() {
        let today = day(2024, 5, 1);
        let habit = Habit::new("Meditate #Calm".to_string());
        let log = log_days(habit.id, &[today]);

        let tasks = vec![
            done_task(today, "Finish report 🎯 #work"),
            done_task(today, "Email client #WORK"),
            Task::new(today, "Untouched #work".to_string()),
        ];

        let summary = today_summary(&tasks, &[habit], &log, today);
        assert_eq!(summary.habits_done, 1);
        assert_eq!(summary.habits_total, 1);
        assert_eq!(summary.tasks_done, 2);
        assert_eq!(summary.tasks_total, 3);
        assert_eq!(summary.total_completed(), 3);
        assert_eq!(summary.priority_done, 1);

        assert_eq!(summary.tags.len(), 2);
        assert_eq!(summary.tags[0].label, "#work");
        assert_eq!(summary.tags[0].count, 2);
        assert_eq!(summary.tags[1].label, "#Calm");
        assert_eq!(summary.tags[1].count, 1);
    }
}
