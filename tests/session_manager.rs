use std::fs;
use std::path::Path;

use file_mover::{CancelToken, FileMoverError, FileSessionStore, MoveRecord, SessionManager, SessionStore};
use tempfile::{TempDir, tempdir};

fn manager_in(td: &TempDir) -> SessionManager<FileSessionStore> {
    SessionManager::new(FileSessionStore::new(td.path().join("state").join("fm-session.json")))
}

#[test]
fn create_persists_a_normalized_root() {
    let state = tempdir().unwrap();
    let work = tempdir().unwrap();
    fs::create_dir(work.path().join("inner")).unwrap();
    let mgr = manager_in(&state);
    let cancel = CancelToken::new();

    let session = mgr.create(&work.path().join("inner").join(".."), &cancel).unwrap();
    let expected = dunce::canonicalize(work.path()).unwrap();
    assert_eq!(session.root_path, expected);
    assert!(session.is_empty());

    let loaded = mgr.get_active(&cancel).unwrap().unwrap();
    assert_eq!(loaded, session);
    assert!(mgr.has_active(&cancel).unwrap());
}

#[test]
fn second_create_names_existing_root() {
    let state = tempdir().unwrap();
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let mgr = manager_in(&state);
    let cancel = CancelToken::new();

    let session = mgr.create(first.path(), &cancel).unwrap();
    let err = mgr.create(second.path(), &cancel).unwrap_err();
    match err {
        FileMoverError::SessionAlreadyActive { root } => assert_eq!(root, session.root_path),
        other => panic!("unexpected error: {other:?}"),
    }
    // the original session is untouched
    assert_eq!(mgr.get_active(&cancel).unwrap().unwrap().id, session.id);
}

#[test]
fn create_rejects_missing_directory() {
    let state = tempdir().unwrap();
    let work = tempdir().unwrap();
    let mgr = manager_in(&state);
    let missing = work.path().join("nope");

    let err = mgr.create(&missing, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, FileMoverError::DirectoryNotFound(ref p) if p == &missing));
    assert!(!mgr.store().exists().unwrap());
}

#[test]
fn create_rejects_a_regular_file() {
    let state = tempdir().unwrap();
    let work = tempdir().unwrap();
    let file = work.path().join("plain.txt");
    fs::write(&file, "x").unwrap();
    let mgr = manager_in(&state);

    let err = mgr.create(&file, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, FileMoverError::DirectoryNotFound(_)));
}

#[test]
fn add_move_appends_in_order() {
    let state = tempdir().unwrap();
    let work = tempdir().unwrap();
    let mgr = manager_in(&state);
    let cancel = CancelToken::new();
    mgr.create(work.path(), &cancel).unwrap();

    for name in ["a", "b", "c"] {
        mgr.add_move(MoveRecord::new(name, format!("out/{name}"), false), &cancel).unwrap();
    }
    let moves = mgr.get_active(&cancel).unwrap().unwrap().moves;
    let sources: Vec<_> = moves.iter().map(MoveRecord::source_path).collect();
    assert_eq!(sources, ["a", "b", "c"]);
}

#[test]
fn add_move_without_session_changes_nothing() {
    let state = tempdir().unwrap();
    let mgr = manager_in(&state);
    let err = mgr
        .add_move(MoveRecord::new("a", "b", false), &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, FileMoverError::NoActiveSession));
    assert!(!mgr.store().exists().unwrap());
}

#[test]
fn cancel_clears_and_second_cancel_fails() {
    let state = tempdir().unwrap();
    let work = tempdir().unwrap();
    let mgr = manager_in(&state);
    let cancel = CancelToken::new();
    mgr.create(work.path(), &cancel).unwrap();

    mgr.cancel(&cancel).unwrap();
    assert!(!mgr.has_active(&cancel).unwrap());
    assert!(matches!(mgr.cancel(&cancel), Err(FileMoverError::NoActiveSession)));
}

#[test]
fn tripped_token_stops_before_any_write() {
    let state = tempdir().unwrap();
    let work = tempdir().unwrap();
    let mgr = manager_in(&state);
    let cancel = CancelToken::new();
    cancel.cancel();

    assert!(matches!(mgr.create(work.path(), &cancel), Err(FileMoverError::Interrupted)));
    assert!(!Path::new(mgr.store().path()).exists());
}
