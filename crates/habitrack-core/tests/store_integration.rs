//! Integration tests for saving and loading habit books.

use chrono::NaiveDate;
use habitrack_core::{Cadence, CoreError, HabitBook, Overview, StoreError, View};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_save_and_load_same_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    let today = date(2026, 10, 16);

    let mut book = HabitBook::new();
    let read = book.add("Example Habit1", "weekly", today).id().to_string();
    book.add("Example Habit2", "monthly", today);
    book.toggle(&read).unwrap();
    book.save(&path).unwrap();

    let loaded = HabitBook::load(&path, today).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded, book);
    assert!(loaded.get(&read).unwrap().completed());
}

#[test]
fn test_load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let book = HabitBook::load(&dir.path().join("absent.json"), date(2026, 10, 16)).unwrap();
    assert!(book.is_empty());
}

#[test]
fn test_load_brings_habits_current() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    let saved_on = date(2026, 10, 16);

    let mut book = HabitBook::new();
    let daily = book.add("Stretch", "daily", saved_on).id().to_string();
    let weekly = book.add("Review", "weekly", saved_on).id().to_string();
    book.toggle(&daily).unwrap();
    book.save(&path).unwrap();

    // Friday to the following Tuesday
    let loaded = HabitBook::load(&path, date(2026, 10, 20)).unwrap();

    let daily = loaded.get(&daily).unwrap();
    assert_eq!(daily.history(), &[true, false, false, false, false][..]);
    assert_eq!(daily.interval_start(), date(2026, 10, 20));
    assert!(!daily.completed());
    assert_eq!(daily.current_streak(), 0);

    let weekly = loaded.get(&weekly).unwrap();
    assert_eq!(weekly.cadence(), Cadence::Weekly);
    assert_eq!(weekly.history(), &[false, false][..]);
    assert_eq!(weekly.interval_start(), date(2026, 10, 19));
}

#[test]
fn test_save_file_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    let today = date(2026, 10, 16);

    let mut book = HabitBook::new();
    let id = book.add("Read", "monthly", today).id().to_string();
    book.save(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let record = &json["habits"][&id];
    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["name"], "Read");
    assert_eq!(record["cadence"], "monthly");
    assert_eq!(record["completed"], 0);
    assert_eq!(record["interval_start"], "01-10-2026");
    assert_eq!(record["longest_streak"], 0);
    assert_eq!(record["current_streak"], 0);
    assert_eq!(record["longest_negative"], 1);
    assert_eq!(record["current_negative"], 1);
    assert_eq!(record["history"], serde_json::json!([0]));
    assert_eq!(json["longest_streak"], id.as_str());
}

#[test]
fn test_load_handwritten_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    std::fs::write(
        &path,
        r#"{
            "habits": {
                "a1": {
                    "id": "a1", "name": "Piano", "cadence": "Weekly",
                    "completed": 1, "interval_start": "12-10-2026",
                    "longest_streak": 4, "current_streak": 2,
                    "longest_negative": 3, "current_negative": 1,
                    "history": [0, 1, 1, 1, 1, 0, 1, 1]
                }
            },
            "longest_streak": null
        }"#,
    )
    .unwrap();

    let book = HabitBook::load(&path, date(2026, 10, 18)).unwrap();
    let piano = book.get("a1").unwrap();
    assert_eq!(piano.cadence(), Cadence::Weekly);
    assert_eq!(piano.longest_streak(), 4);
    assert_eq!(piano.current_streak(), 2);
    assert!(piano.completed());

    let overview = Overview::of(book.iter());
    assert_eq!(overview.longest_streak.unwrap().value, 4);
    assert_eq!(book.resolve(&View::default(), "0").unwrap(), "a1");
}

#[test]
fn test_load_rejects_malformed_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    std::fs::write(
        &path,
        r#"{"habits": {"x": {
            "id": "x", "name": "Broken", "cadence": "daily",
            "completed": 0, "interval_start": "16-10-2026",
            "longest_streak": 0, "current_streak": 0,
            "longest_negative": 1, "current_negative": 1,
            "history": []
        }}}"#,
    )
    .unwrap();

    let err = HabitBook::load(&path, date(2026, 10, 16)).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Store(StoreError::InvalidRecord { ref id, .. }) if id == "x"
    ));
}

#[test]
fn test_load_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(
        HabitBook::load(&path, date(2026, 10, 16)),
        Err(CoreError::Store(StoreError::ParseFailed { .. }))
    ));
}
