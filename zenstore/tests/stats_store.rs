use std::fs;
use tempfile::TempDir;
use zenaudio::Category;
use zenstore::stats::{CATEGORY_STATS_FILE, CREATED_MEDITATIONS_FILE};
use zenstore::{StatsStore, StoreError};

#[test]
fn test_completions_accumulate_and_persist() {
    let dir = TempDir::new().unwrap();
    let store = StatsStore::open(dir.path()).unwrap();

    assert_eq!(store.record_category_completion(Category::Energy).unwrap(), 1);
    assert_eq!(store.record_category_completion(Category::Energy).unwrap(), 2);
    assert_eq!(store.record_category_completion(Category::Break).unwrap(), 1);

    let reopened = StatsStore::open(dir.path()).unwrap();
    let counts = reopened.category_counts();
    assert_eq!(counts.get(&Category::Energy), Some(&2));
    assert_eq!(counts.get(&Category::Break), Some(&1));
    assert_eq!(counts.get(&Category::Calm), None);

    let raw = fs::read_to_string(dir.path().join(CATEGORY_STATS_FILE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({"energy": 2, "break": 1}));
}

#[test]
fn test_foreign_entries_are_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CATEGORY_STATS_FILE),
        r#"{"calm": 3, "energy": "lots", "sleep": 9}"#,
    )
    .unwrap();
    let store = StatsStore::open(dir.path()).unwrap();

    let counts = store.category_counts();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[&Category::Calm], 3);
    assert_eq!(store.record_category_completion(Category::Calm).unwrap(), 4);
}

#[test]
fn test_created_meditations_newest_first() {
    let dir = TempDir::new().unwrap();
    let store = StatsStore::open(dir.path()).unwrap();

    let first = store.save_created_meditation("Morning", 8).unwrap();
    let second = store.save_created_meditation("  ", 20).unwrap();

    let all = store.created_meditations();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], second);
    assert_eq!(all[1], first);
    assert_eq!(all[0].name, "My meditation");
    assert!(all[0].created_at >= all[1].created_at);
}

#[test]
fn test_zero_minutes_rejected() {
    let dir = TempDir::new().unwrap();
    let store = StatsStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.save_created_meditation("x", 0),
        Err(StoreError::InvalidMinutes(0))
    ));
    assert!(store.created_meditations().is_empty());
}

#[test]
fn test_summary_and_reset() {
    let dir = TempDir::new().unwrap();
    let store = StatsStore::open(dir.path()).unwrap();

    store.save_created_meditation("a", 12).unwrap();
    store.save_created_meditation("b", 8).unwrap();
    store.record_category_completion(Category::Break).unwrap();

    let summary = store.summary();
    assert_eq!(summary.total_minutes, 20);
    assert_eq!(summary.session_count, 3);
    assert_eq!(summary.favourite, Some(Category::Break));

    store.reset().unwrap();
    assert!(!dir.path().join(CREATED_MEDITATIONS_FILE).exists());
    assert_eq!(store.summary().session_count, 0);
    assert_eq!(store.summary().favourite, None);

    // Deux resets de suite : rien à supprimer, pas d'erreur
    store.reset().unwrap();
}

#[test]
fn test_corrupt_created_document_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CREATED_MEDITATIONS_FILE), r#"[{"id": 1}]"#).unwrap();
    let store = StatsStore::open(dir.path()).unwrap();

    assert!(store.created_meditations().is_empty());
    store.save_created_meditation("fresh", 8).unwrap();
    assert_eq!(store.created_meditations().len(), 1);
}
