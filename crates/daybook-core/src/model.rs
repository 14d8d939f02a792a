use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Habit ids ticked per calendar day. Days without ticks are absent from the
/// map rather than mapped to an empty set.
pub type HabitLog = BTreeMap<NaiveDate, BTreeSet<Uuid>>;

/// Free-text note per calendar day; blank notes are absent.
pub type Notes = BTreeMap<NaiveDate, String>;

/// A task belonging to exactly one calendar day. The date never changes
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,

    pub date: NaiveDate,

    pub title: String,

    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn new(date: NaiveDate, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            title,
            done: false,
        }
    }
}

/// A recurring habit. Global, not scoped to a date; per-day completion lives
/// in the [`HabitLog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub title: String,
}

impl Habit {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
        }
    }
}

/// A calendar annotation; many events may share a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub date: NaiveDate,
    pub title: String,
}

impl Event {
    pub fn new(date: NaiveDate, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            title,
        }
    }
}

/// First 8 hex digits of the id, enough to address records from the CLI.
pub fn short_id(id: Uuid) -> String {
    let simple = id.simple().to_string();
    simple[..8].to_string()
}
