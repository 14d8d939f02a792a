use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::model::{Event, Habit, HabitLog, Notes, Task};
use crate::storage::Storage;

/// The in-memory domain store: the five collections plus the storage they
/// persist to. Collections load once at open; every mutator updates memory
/// first and then writes the owning document. A failed write is logged and
/// otherwise unobserved, so memory and disk can diverge until the next
/// successful save.
#[derive(Debug)]
pub struct Store {
    storage: Storage,
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub habit_log: HabitLog,
    pub events: Vec<Event>,
    pub notes: Notes,
}

/// Merged backup document. Every field is optional so a partial backup
/// replaces only the collections it carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habits: Option<Vec<Habit>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habit_log: Option<HabitLog>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,
}

impl Store {
    #[instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let storage = Storage::open(data_dir)?;
        let store = Self {
            tasks: storage.load_tasks(),
            habits: storage.load_habits(),
            habit_log: storage.load_habit_log(),
            events: storage.load_events(),
            notes: storage.load_notes(),
            storage,
        };

        debug!(
            tasks = store.tasks.len(),
            habits = store.habits.len(),
            logged_days = store.habit_log.len(),
            events = store.events.len(),
            notes = store.notes.len(),
            "loaded collections"
        );
        Ok(store)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // ----- tasks

    pub fn tasks_for(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    #[instrument(skip(self, title))]
    pub fn add_task(&mut self, date: NaiveDate, title: &str) -> Uuid {
        let task = Task::new(date, title.trim().to_string());
        let id = task.id;
        self.tasks.push(task);
        self.persist_tasks();
        id
    }

    #[instrument(skip(self))]
    pub fn set_task_done(&mut self, id: Uuid, done: bool) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.done = done;
        self.persist_tasks();
        true
    }

    #[instrument(skip(self))]
    pub fn delete_task(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist_tasks();
        true
    }

    // ----- habits

    #[instrument(skip(self, title))]
    pub fn add_habit(&mut self, title: &str) -> Uuid {
        let habit = Habit::new(title.trim().to_string());
        let id = habit.id;
        self.habits.push(habit);
        self.persist_habits();
        id
    }

    /// Remove a habit and cascade into the log: the habit disappears from
    /// every logged day and emptied days are pruned.
    #[instrument(skip(self))]
    pub fn delete_habit(&mut self, id: Uuid) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            return false;
        }
        self.persist_habits();

        self.habit_log.retain(|_, row| {
            row.remove(&id);
            !row.is_empty()
        });
        self.persist_habit_log();
        true
    }

    pub fn habit_done_on(&self, id: Uuid, date: NaiveDate) -> bool {
        self.habit_log
            .get(&date)
            .is_some_and(|row| row.contains(&id))
    }

    #[instrument(skip(self))]
    pub fn set_habit_done(&mut self, id: Uuid, date: NaiveDate, done: bool) {
        if done {
            self.habit_log.entry(date).or_default().insert(id);
        } else if let Some(row) = self.habit_log.get_mut(&date) {
            row.remove(&id);
            if row.is_empty() {
                self.habit_log.remove(&date);
            }
        }
        self.persist_habit_log();
    }

    // ----- events

    pub fn events_for(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    #[instrument(skip(self, title))]
    pub fn add_event(&mut self, date: NaiveDate, title: &str) -> Uuid {
        let event = Event::new(date, title.trim().to_string());
        let id = event.id;
        self.events.push(event);
        self.persist_events();
        id
    }

    /// No cascade here: deleting tasks or events never touches notes or the
    /// habit log.
    #[instrument(skip(self))]
    pub fn delete_event(&mut self, id: Uuid) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return false;
        }
        self.persist_events();
        true
    }

    // ----- notes

    pub fn note_for(&self, date: NaiveDate) -> &str {
        self.notes.get(&date).map(String::as_str).unwrap_or_default()
    }

    #[instrument(skip(self, text))]
    pub fn set_note(&mut self, date: NaiveDate, text: &str) {
        if text.trim().is_empty() {
            self.notes.remove(&date);
        } else {
            self.notes.insert(date, text.to_string());
        }
        self.persist_notes();
    }

    // ----- backup / reset

    pub fn export_backup(&self) -> Backup {
        Backup {
            tasks: Some(self.tasks.clone()),
            habits: Some(self.habits.clone()),
            habit_log: Some(self.habit_log.clone()),
            events: Some(self.events.clone()),
            notes: Some(self.notes.clone()),
        }
    }

    /// Replace every collection the backup carries, leave the rest alone,
    /// then persist all five documents.
    #[instrument(skip(self, backup))]
    pub fn import_backup(&mut self, backup: Backup) {
        if let Some(tasks) = backup.tasks {
            self.tasks = tasks;
        }
        if let Some(habits) = backup.habits {
            self.habits = habits;
        }
        if let Some(mut log) = backup.habit_log {
            log.retain(|_, row| !row.is_empty());
            self.habit_log = log;
        }
        if let Some(events) = backup.events {
            self.events = events;
        }
        if let Some(notes) = backup.notes {
            self.notes = notes;
        }

        self.persist_all();
        info!(
            tasks = self.tasks.len(),
            habits = self.habits.len(),
            events = self.events.len(),
            "imported backup"
        );
    }

    #[instrument(skip(self))]
    pub fn clear_all(&mut self) {
        self.tasks.clear();
        self.habits.clear();
        self.habit_log.clear();
        self.events.clear();
        self.notes.clear();
        self.persist_all();
        info!("cleared all collections");
    }

    fn persist_all(&self) {
        self.persist_tasks();
        self.persist_habits();
        self.persist_habit_log();
        self.persist_events();
        self.persist_notes();
    }

    fn persist_tasks(&self) {
        if let Err(err) = self.storage.save_tasks(&self.tasks) {
            warn!(error = %err, "failed saving tasks; in-memory state kept");
        }
    }

    fn persist_habits(&self) {
        if let Err(err) = self.storage.save_habits(&self.habits) {
            warn!(error = %err, "failed saving habits; in-memory state kept");
        }
    }

    fn persist_habit_log(&self) {
        if let Err(err) = self.storage.save_habit_log(&self.habit_log) {
            warn!(error = %err, "failed saving habit log; in-memory state kept");
        }
    }

    fn persist_events(&self) {
        if let Err(err) = self.storage.save_events(&self.events) {
            warn!(error = %err, "failed saving events; in-memory state kept");
        }
    }

    fn persist_notes(&self) {
        if let Err(err) = self.storage.save_notes(&self.notes) {
            warn!(error = %err, "failed saving notes; in-memory state kept");
        }
    }
}
