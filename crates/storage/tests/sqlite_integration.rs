use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteKvStore;

#[tokio::test]
async fn sqlite_kv_roundtrip_and_overwrite() {
    let repo = SqliteKvStore::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("missing").await.unwrap(), None);

    repo.set("brainifi_session_1", r#"{"a":1}"#).await.unwrap();
    repo.set("brainifi_session_1", r#"{"a":2}"#).await.unwrap();
    assert_eq!(
        repo.get("brainifi_session_1").await.unwrap().as_deref(),
        Some(r#"{"a":2}"#)
    );

    repo.remove("brainifi_session_1").await.unwrap();
    assert_eq!(repo.get("brainifi_session_1").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteKvStore::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    repo.set("k", "v").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_storage_lists_session_keys() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_sessions?mode=memory&cache=shared")
        .await
        .expect("storage");

    storage.kv.set("brainifi_session_200", "{}").await.unwrap();
    storage.kv.set("brainifi_session_100", "{}").await.unwrap();
    storage.kv.set("brainifi_sessions_extra", "{}").await.unwrap();
    storage.kv.set("unrelated", "{}").await.unwrap();

    let keys = storage.session_keys().await.unwrap();
    let raw: Vec<&str> = keys.iter().map(|key| key.as_str()).collect();
    assert_eq!(raw, vec!["brainifi_session_100", "brainifi_session_200"]);
}

#[tokio::test]
async fn file_database_is_created_and_reopened() {
    let path = std::env::temp_dir().join(format!("study-kv-{}.sqlite3", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}", path.display());

    let storage = Storage::sqlite(&url).await.expect("storage");
    storage.kv.set("brainifi_session_1", "{}").await.unwrap();
    assert!(path.exists());

    let store = SqliteKvStore::connect(&url).await.expect("reconnect");
    assert_eq!(
        store.get("brainifi_session_1").await.unwrap().as_deref(),
        Some("{}")
    );
    let _ = std::fs::remove_file(&path);
}
