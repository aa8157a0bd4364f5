use std::fs;
use tempfile::TempDir;
use zenstore::ProfileStore;
use zenstore::profile::{ANONYMOUS_NAME, GREETING_FALLBACK, PROFILE_FILE};

#[test]
fn test_fallback_names_without_profile() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::open(dir.path()).unwrap();

    assert_eq!(store.name(), None);
    assert_eq!(store.display_name(), ANONYMOUS_NAME);
    assert_eq!(store.greeting_name(), GREETING_FALLBACK);
    assert!(!store.path().exists());
}

#[test]
fn test_name_is_trimmed_persisted_and_upper_cased() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::open(dir.path()).unwrap();

    assert_eq!(store.set_name("  Ada Lovelace "), "ADA LOVELACE");

    let reopened = ProfileStore::open(dir.path()).unwrap();
    assert_eq!(reopened.name().as_deref(), Some("Ada Lovelace"));
    assert_eq!(reopened.display_name(), "ADA LOVELACE");
    assert_eq!(reopened.greeting_name(), "ADA LOVELACE");
}

#[test]
fn test_blank_name_is_stored_as_anon() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::open(dir.path()).unwrap();
    store.set_name("Ada");

    assert_eq!(store.set_name("   "), ANONYMOUS_NAME);
    assert_eq!(store.name().as_deref(), Some(ANONYMOUS_NAME));
    assert_eq!(store.greeting_name(), ANONYMOUS_NAME);
}

#[test]
fn test_other_profile_fields_are_kept() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(PROFILE_FILE),
        r#"{"name": "ada", "avatarUri": "file:///avatar.png"}"#,
    )
    .unwrap();
    let store = ProfileStore::open(dir.path()).unwrap();
    assert_eq!(store.display_name(), "ADA");

    store.set_name("Grace");

    let raw = fs::read_to_string(dir.path().join(PROFILE_FILE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"name": "Grace", "avatarUri": "file:///avatar.png"})
    );
}

#[test]
fn test_unreadable_profile_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(PROFILE_FILE), r#"["ada"]"#).unwrap();
    let store = ProfileStore::open(dir.path()).unwrap();
    assert_eq!(store.name(), None);

    fs::write(dir.path().join(PROFILE_FILE), r#"{"name": 42}"#).unwrap();
    assert_eq!(store.load(), None);
    assert_eq!(store.display_name(), ANONYMOUS_NAME);
}

#[tokio::test]
async fn test_name_changes_are_broadcast() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::open(dir.path()).unwrap();
    let mut rx = store.subscribe_name();

    store.set_name("ada");
    store.set_name("");

    assert_eq!(rx.recv().await.unwrap(), "ADA");
    assert_eq!(rx.recv().await.unwrap(), ANONYMOUS_NAME);
}
