use std::fs;
use std::path::PathBuf;

use file_mover::{FileSessionStore, MoveRecord, Session, SessionStore};
use tempfile::tempdir;

fn sample_session() -> Session {
    let mut s = Session::new(PathBuf::from("/srv/photos"));
    s.moves.push(MoveRecord::new("a.jpg", "2024/a.jpg", false));
    s.moves.push(MoveRecord::new("b.jpg", "2024/b.jpg", true));
    s
}

#[test]
fn load_without_record_is_none() {
    let td = tempdir().unwrap();
    let store = FileSessionStore::new(td.path().join("fm-session.json"));
    assert!(store.load().unwrap().is_none());
    assert!(!store.exists().unwrap());
}

#[test]
fn save_then_load_preserves_order_and_flags() {
    let td = tempdir().unwrap();
    let store = FileSessionStore::new(td.path().join("fm-session.json"));
    let session = sample_session();
    store.save(&session).unwrap();

    let loaded = store.load().unwrap().expect("session present");
    assert_eq!(loaded, session);
    assert!(loaded.moves[1].overwrite());
    assert!(store.exists().unwrap());
}

#[test]
fn save_replaces_prior_record() {
    let td = tempdir().unwrap();
    let store = FileSessionStore::new(td.path().join("fm-session.json"));
    store.save(&sample_session()).unwrap();

    let other = Session::new(PathBuf::from("/srv/music"));
    store.save(&other).unwrap();
    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.id, other.id);
    assert!(loaded.moves.is_empty());

    // no temp siblings left behind
    let names: Vec<_> = fs::read_dir(td.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(names.len(), 1, "unexpected files: {names:?}");
}

#[test]
fn save_creates_missing_parent_directories() {
    let td = tempdir().unwrap();
    let path = td.path().join("nested").join("state").join("fm-session.json");
    let store = FileSessionStore::new(&path);
    store.save(&sample_session()).unwrap();
    assert!(path.is_file());
}

#[test]
fn corrupt_record_is_discarded() {
    let td = tempdir().unwrap();
    let path = td.path().join("fm-session.json");
    fs::write(&path, "{ this is not json").unwrap();

    let store = FileSessionStore::new(&path);
    // exists() only reports presence; the record is not parsed
    assert!(store.exists().unwrap());
    assert!(store.load().unwrap().is_none());
    assert!(!path.exists(), "corrupt record should be removed");
}

#[test]
fn record_with_wrong_shape_is_discarded() {
    let td = tempdir().unwrap();
    let path = td.path().join("fm-session.json");
    fs::write(&path, r#"{"basePath": 42}"#).unwrap();

    let store = FileSessionStore::new(&path);
    assert!(store.load().unwrap().is_none());
    assert!(!path.exists());
}

#[test]
fn delete_is_idempotent() {
    let td = tempdir().unwrap();
    let store = FileSessionStore::new(td.path().join("fm-session.json"));
    store.delete().unwrap();
    store.save(&sample_session()).unwrap();
    store.delete().unwrap();
    assert!(!store.exists().unwrap());
    store.delete().unwrap();
}

#[test]
fn persisted_document_uses_camel_case_fields() {
    let td = tempdir().unwrap();
    let path = td.path().join("fm-session.json");
    let store = FileSessionStore::new(&path);
    store.save(&sample_session()).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v["basePath"], "/srv/photos");
    assert_eq!(v["stagedMoves"].as_array().unwrap().len(), 2);
    assert_eq!(v["stagedMoves"][0]["destinationPath"], "2024/a.jpg");
}

#[cfg(unix)]
#[test]
fn record_is_private_to_owner() {
    use std::os::unix::fs::PermissionsExt;

    let td = tempdir().unwrap();
    let path = td.path().join("fm-session.json");
    FileSessionStore::new(&path).save(&sample_session()).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
