//! Session state integration tests
//!
//! Tokens are minted with jsonwebtoken the same way the backend signs them;
//! the client only reads the payload and never checks the signature.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use tempfile::TempDir;

use tinylink::errors::{NOT_LOGGED_IN, TinylinkError};
use tinylink::session::{LOGIN_ROUTE, RouteDecision, SessionState};
use tinylink::storage::{FileStore, MemoryStore, PersistentStore, TOKEN_KEY};

#[derive(Serialize)]
struct BackendClaims {
    id: String,
    email: String,
    name: String,
    exp: i64,
}

fn mint(exp: i64) -> String {
    let claims = BackendClaims {
        id: "64f1c0ffee".to_string(),
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

fn live_token() -> String {
    mint((Utc::now() + Duration::hours(1)).timestamp())
}

fn expired_token() -> String {
    mint((Utc::now() - Duration::hours(1)).timestamp())
}

// =============================================================================
// Validity
// =============================================================================

#[test]
fn test_expired_token_is_invalid() {
    let session = SessionState::new(MemoryStore::arc());
    session.login(&expired_token()).unwrap();
    assert!(session.is_authenticated());
    assert!(!session.is_valid());
}

#[test]
fn test_live_token_is_valid() {
    let session = SessionState::new(MemoryStore::arc());
    session.login(&live_token()).unwrap();
    assert!(session.is_valid());
}

#[test]
fn test_malformed_persisted_token_is_invalid_without_error() {
    let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "abc.def")]));
    let session = SessionState::new(store);
    assert!(session.is_authenticated());
    assert!(!session.is_valid());
    assert!(session.claims().is_none());
}

#[test]
fn test_no_token_is_invalid() {
    let session = SessionState::new(MemoryStore::arc());
    assert!(!session.is_valid());
    assert_eq!(session.bearer().unwrap_err().message(), NOT_LOGGED_IN);
}

#[test]
fn test_validity_checked_against_given_instant() {
    let exp = Utc::now() + Duration::minutes(5);
    let session = SessionState::new(MemoryStore::arc());
    session.login(&mint(exp.timestamp())).unwrap();

    assert!(session.is_valid_at(exp - Duration::seconds(1)));
    assert!(!session.is_valid_at(exp + Duration::seconds(1)));
    assert_eq!(session.expires_at().map(|d| d.timestamp()), Some(exp.timestamp()));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_token_survives_restart_with_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    let token = live_token();

    {
        let store = Arc::new(FileStore::open(&path).unwrap());
        let session = SessionState::new(store);
        session.login(&token).unwrap();
    }

    let store = Arc::new(FileStore::open(&path).unwrap());
    let session = SessionState::new(store.clone());
    assert_eq!(session.token(), Some(token));

    session.logout();
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_logout_twice_is_harmless() {
    let store = MemoryStore::arc();
    let session = SessionState::new(store.clone());
    session.login(&live_token()).unwrap();

    session.logout();
    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_user_from_claims() {
    let session = SessionState::new(MemoryStore::arc());
    session.login(&live_token()).unwrap();

    let user = session.user().unwrap();
    assert_eq!(user.id.as_deref(), Some("64f1c0ffee"));
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    assert_eq!(user.name.as_deref(), Some("Ada"));
}

fn mint_payload(payload: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

#[test]
fn test_numeric_user_id_is_accepted() {
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let session = SessionState::new(MemoryStore::arc());
    session
        .login(&mint_payload(serde_json::json!({"exp": exp, "id": 42})))
        .unwrap();

    assert!(session.is_valid());
    assert_eq!(session.user().unwrap().id.as_deref(), Some("42"));
}

#[test]
fn test_restored_token_with_id_and_user_id_stays_logged_in() {
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let token = mint_payload(serde_json::json!({"exp": exp, "userId": "u", "id": "u"}));
    let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, token.as_str())]));
    let session = SessionState::new(store.clone());

    assert_eq!(session.guard(), RouteDecision::Allow);
    assert_eq!(session.user().unwrap().id.as_deref(), Some("u"));
    assert!(store.get(TOKEN_KEY).unwrap().is_some());
}

#[test]
fn test_login_with_garbage_is_validation_error() {
    let session = SessionState::new(MemoryStore::arc());
    let err = session.login("   ").unwrap_err();
    assert!(matches!(err, TinylinkError::Validation { .. }));
    assert!(!session.is_authenticated());
}

// =============================================================================
// Route guard
// =============================================================================

#[test]
fn test_guard_redirects_without_token() {
    let session = SessionState::new(MemoryStore::arc());
    let decision = session.guard();
    assert_eq!(decision, RouteDecision::RedirectToLogin);
    assert_eq!(decision.redirect_target(), Some(LOGIN_ROUTE));
}

#[test]
fn test_guard_clears_expired_token() {
    let store = MemoryStore::arc();
    let session = SessionState::new(store.clone());
    session.login(&expired_token()).unwrap();

    assert_eq!(session.guard(), RouteDecision::RedirectToLogin);
    assert!(session.token().is_none());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_guard_allows_live_token() {
    let session = SessionState::new(MemoryStore::arc());
    session.login(&live_token()).unwrap();
    assert_eq!(session.guard(), RouteDecision::Allow);
    assert!(session.is_authenticated());
}
