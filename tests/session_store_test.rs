//! Integration tests for session token persistence.
//!
//! These cover the file-backed store end to end: round trips, overwrite,
//! logout, and survival across store instances (a fresh app start).

use std::sync::Arc;

use circleshare_core::session::{FileTokenStore, Session, TokenStore, AUTH_TOKEN_KEY};
use tempfile::TempDir;

fn temp_store() -> (TempDir, FileTokenStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = FileTokenStore::new(dir.path());
    (dir, store)
}

#[test]
fn save_and_load_round_trip() {
    let (_dir, store) = temp_store();
    store.save("tok-abc").unwrap();
    assert_eq!(store.load().unwrap(), Some("tok-abc".to_string()));
}

#[test]
fn load_before_any_save_is_none() {
    let (_dir, store) = temp_store();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn save_overwrites_previous_token() {
    let (_dir, store) = temp_store();
    store.save("first").unwrap();
    store.save("second").unwrap();
    assert_eq!(store.load().unwrap(), Some("second".to_string()));
}

#[test]
fn clear_removes_the_token() {
    let (_dir, store) = temp_store();
    store.save("tok").unwrap();
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn clear_without_token_succeeds() {
    let (_dir, store) = temp_store();
    assert!(store.clear().is_ok());
}

#[test]
fn token_survives_a_new_store_instance() {
    let dir = TempDir::new().expect("temp dir");

    let store = FileTokenStore::new(dir.path());
    store.save("persistent").unwrap();
    drop(store);

    // A fresh instance over the same directory sees the token, the way a
    // restarted app resumes its session.
    let reopened = FileTokenStore::new(dir.path());
    assert_eq!(reopened.load().unwrap(), Some("persistent".to_string()));
}

#[test]
fn store_uses_the_fixed_key_as_file_name() {
    let (dir, store) = temp_store();
    store.save("tok").unwrap();
    assert!(dir.path().join(AUTH_TOKEN_KEY).exists());
}

#[test]
fn session_over_file_store_logs_in_and_out() {
    let dir = TempDir::new().expect("temp dir");
    let session = Session::new(Arc::new(FileTokenStore::new(dir.path())));

    assert!(!session.is_logged_in());
    session.set_token("tok-xyz").unwrap();
    assert!(session.is_logged_in());
    assert_eq!(session.token().unwrap().unwrap().as_str(), "tok-xyz");

    session.clear().unwrap();
    assert!(!session.is_logged_in());
}

#[test]
fn missing_data_directory_is_created_on_save() {
    let dir = TempDir::new().expect("temp dir");
    let nested = dir.path().join("deep").join("nested");

    let store = FileTokenStore::new(&nested);
    store.save("tok").unwrap();
    assert!(nested.join(AUTH_TOKEN_KEY).exists());
}
