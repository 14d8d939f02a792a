use chrono::NaiveDate;
use daybook_core::store::{Backup, Store};
use tempfile::tempdir;
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn task_flow_persists_across_reopen() {
    let temp = tempdir().expect("tempdir");
    let date = day(2024, 5, 1);

    let mut store = Store::open(temp.path()).expect("open store");
    let id = store.add_task(date, "  Finish report 🎯 #work  ");
    assert_eq!(store.tasks_for(date).len(), 1);
    // Input is trimmed but the markers stay verbatim in the stored title.
    assert_eq!(store.tasks[0].title, "Finish report 🎯 #work");
    assert!(store.set_task_done(id, true));

    let store = Store::open(temp.path()).expect("reopen store");
    assert_eq!(store.tasks.len(), 1);
    assert_eq!(store.tasks[0].id, id);
    assert_eq!(store.tasks[0].date, date);
    assert!(store.tasks[0].done);
}

#[test]
fn habit_deletion_cascades_into_the_log() {
    let temp = tempdir().expect("tempdir");
    let mut store = Store::open(temp.path()).expect("open store");

    let reading = store.add_habit("Read 20 pages");
    let running = store.add_habit("Run #health");
    let monday = day(2024, 4, 29);
    let tuesday = day(2024, 4, 30);

    store.set_habit_done(reading, monday, true);
    store.set_habit_done(running, monday, true);
    store.set_habit_done(reading, tuesday, true);

    assert!(store.delete_habit(reading));

    // Tuesday only held the deleted habit, so the whole day is pruned.
    assert!(!store.habit_log.contains_key(&tuesday));
    assert!(store.habit_done_on(running, monday));
    assert!(!store.habit_done_on(reading, monday));
    assert!(store.habit_log.values().all(|row| !row.is_empty()));

    let store = Store::open(temp.path()).expect("reopen store");
    assert_eq!(store.habits.len(), 1);
    assert_eq!(store.habit_log.len(), 1);
}

#[test]
fn unticking_prunes_emptied_days() {
    let temp = tempdir().expect("tempdir");
    let mut store = Store::open(temp.path()).expect("open store");

    let habit = store.add_habit("Meditate");
    let date = day(2024, 5, 1);

    store.set_habit_done(habit, date, true);
    assert!(store.habit_done_on(habit, date));

    store.set_habit_done(habit, date, false);
    assert!(!store.habit_done_on(habit, date));
    assert!(store.habit_log.is_empty());
}

#[test]
fn blank_note_text_removes_the_entry() {
    let temp = tempdir().expect("tempdir");
    let mut store = Store::open(temp.path()).expect("open store");
    let date = day(2024, 5, 1);

    store.set_note(date, "Good day overall.");
    assert_eq!(store.note_for(date), "Good day overall.");

    store.set_note(date, "   ");
    assert_eq!(store.note_for(date), "");
    assert!(store.notes.is_empty());
}

#[test]
fn deleting_a_task_never_touches_events_or_notes() {
    let temp = tempdir().expect("tempdir");
    let mut store = Store::open(temp.path()).expect("open store");
    let date = day(2024, 5, 1);

    let task = store.add_task(date, "Prepare slides");
    store.add_event(date, "Team sync");
    store.set_note(date, "Remember the deck.");

    assert!(store.delete_task(task));
    assert_eq!(store.events_for(date).len(), 1);
    assert_eq!(store.note_for(date), "Remember the deck.");
}

#[test]
fn backup_round_trips_through_export_and_import() {
    let source_dir = tempdir().expect("tempdir");
    let mut source = Store::open(source_dir.path()).expect("open store");

    let date = day(2024, 5, 1);
    source.add_task(date, "Finish report 🎯 #work");
    source.add_task(day(2024, 5, 2), "Buy groceries");
    let habit = source.add_habit("Read 20 pages");
    source.set_habit_done(habit, date, true);
    source.add_event(date, "Team sync");
    source.set_note(date, "Solid progress.");

    let backup = source.export_backup();
    let serialized = serde_json::to_string(&backup).expect("serialize backup");
    let parsed: Backup = serde_json::from_str(&serialized).expect("parse backup");

    let target_dir = tempdir().expect("tempdir");
    let mut target = Store::open(target_dir.path()).expect("open store");
    target.import_backup(parsed);

    let mut source_ids: Vec<Uuid> = source.tasks.iter().map(|t| t.id).collect();
    let mut target_ids: Vec<Uuid> = target.tasks.iter().map(|t| t.id).collect();
    source_ids.sort();
    target_ids.sort();
    assert_eq!(source_ids, target_ids);

    assert_eq!(target.habits.len(), 1);
    assert_eq!(target.habits[0].id, habit);
    assert!(target.habit_done_on(habit, date));
    assert_eq!(target.events.len(), 1);
    assert_eq!(target.note_for(date), "Solid progress.");

    // And the import persisted: a reopen sees the same data.
    let reopened = Store::open(target_dir.path()).expect("reopen store");
    assert_eq!(reopened.tasks.len(), 2);
    assert_eq!(reopened.events.len(), 1);
}

#[test]
fn partial_backup_replaces_only_present_collections() {
    let temp = tempdir().expect("tempdir");
    let mut store = Store::open(temp.path()).expect("open store");

    store.add_task(day(2024, 5, 1), "Keep me? No.");
    store.add_habit("Keep me, yes.");

    let backup = Backup {
        tasks: Some(vec![]),
        ..Backup::default()
    };
    store.import_backup(backup);

    assert!(store.tasks.is_empty());
    assert_eq!(store.habits.len(), 1);
}

#[test]
fn clear_all_resets_every_collection() {
    let temp = tempdir().expect("tempdir");
    let mut store = Store::open(temp.path()).expect("open store");
    let date = day(2024, 5, 1);

    store.add_task(date, "a task");
    let habit = store.add_habit("a habit");
    store.set_habit_done(habit, date, true);
    store.add_event(date, "an event");
    store.set_note(date, "a note");

    store.clear_all();

    let store = Store::open(temp.path()).expect("reopen store");
    assert!(store.tasks.is_empty());
    assert!(store.habits.is_empty());
    assert!(store.habit_log.is_empty());
    assert!(store.events.is_empty());
    assert!(store.notes.is_empty());
}
