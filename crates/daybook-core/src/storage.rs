use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::model::{Event, Habit, HabitLog, Notes, Task};
use crate::quote::QuoteRecord;

/// Persistence adapter: one JSON document per collection under the data
/// directory. Reads never fail — a missing or malformed document loads as
/// the collection's empty default. Writes replace the document atomically.
#[derive(Debug)]
pub struct Storage {
    pub data_dir: PathBuf,
    tasks_path: PathBuf,
    habits_path: PathBuf,
    habit_log_path: PathBuf,
    events_path: PathBuf,
    notes_path: PathBuf,
    quote_path: PathBuf,
}

impl Storage {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let storage = Self {
            tasks_path: data_dir.join("tasks.json"),
            habits_path: data_dir.join("habits.json"),
            habit_log_path: data_dir.join("habit_log.json"),
            events_path: data_dir.join("events.json"),
            notes_path: data_dir.join("notes.json"),
            quote_path: data_dir.join("quote.json"),
            data_dir,
        };

        info!(data_dir = %storage.data_dir.display(), "opened storage");
        Ok(storage)
    }

    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> Vec<Task> {
        load_or_default(&self.tasks_path)
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[Task]) -> anyhow::Result<()> {
        save_json(&self.tasks_path, tasks).context("failed to save tasks.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_habits(&self) -> Vec<Habit> {
        load_or_default(&self.habits_path)
    }

    #[tracing::instrument(skip(self, habits))]
    pub fn save_habits(&self, habits: &[Habit]) -> anyhow::Result<()> {
        save_json(&self.habits_path, habits).context("failed to save habits.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_habit_log(&self) -> HabitLog {
        load_or_default(&self.habit_log_path)
    }

    #[tracing::instrument(skip(self, log))]
    pub fn save_habit_log(&self, log: &HabitLog) -> anyhow::Result<()> {
        save_json(&self.habit_log_path, log).context("failed to save habit_log.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_events(&self) -> Vec<Event> {
        load_or_default(&self.events_path)
    }

    #[tracing::instrument(skip(self, events))]
    pub fn save_events(&self, events: &[Event]) -> anyhow::Result<()> {
        save_json(&self.events_path, events).context("failed to save events.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_notes(&self) -> Notes {
        load_or_default(&self.notes_path)
    }

    #[tracing::instrument(skip(self, notes))]
    pub fn save_notes(&self, notes: &Notes) -> anyhow::Result<()> {
        save_json(&self.notes_path, notes).context("failed to save notes.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_quote(&self) -> Option<QuoteRecord> {
        load_or_default(&self.quote_path)
    }

    #[tracing::instrument(skip(self, record))]
    pub fn save_quote(&self, record: &QuoteRecord) -> anyhow::Result<()> {
        save_json(&self.quote_path, record).context("failed to save quote.json")
    }
}

fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(file = %path.display(), error = %err, "unreadable document; starting empty");
            }
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(file = %path.display(), "loaded document");
            value
        }
        Err(err) => {
            warn!(file = %path.display(), error = %err, "malformed document; starting empty");
            T::default()
        }
    }
}

fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    debug!(file = %path.display(), "saving document");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer(&mut temp, value)?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::Storage;
    use crate::model::Task;

    #[test]
    fn missing_and_corrupt_documents_load_empty() {
        let temp = tempdir().expect("tempdir");
        let storage = Storage::open(temp.path()).expect("open storage");

        assert!(storage.load_tasks().is_empty());

        fs::write(temp.path().join("tasks.json"), "{not json").expect("write");
        assert!(storage.load_tasks().is_empty());

        fs::write(temp.path().join("habit_log.json"), "[1, 2, 3]").expect("write");
        assert!(storage.load_habit_log().is_empty());
    }

    #[test]
    fn saved_documents_round_trip() {
        let temp = tempdir().expect("tempdir");
        let storage = Storage::open(temp.path()).expect("open storage");

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        let task = Task::new(date, "Finish report".to_string());
        storage.save_tasks(&[task.clone()]).expect("save tasks");

        let loaded = storage.load_tasks();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, task.id);
        assert_eq!(loaded[0].date, date);
        assert_eq!(loaded[0].title, "Finish report");
        assert!(!loaded[0].done);
    }
}
