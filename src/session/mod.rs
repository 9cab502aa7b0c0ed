//! Session state
//!
//! Owns the bearer token: loads it once from the persisted store, stores it on
//! login, clears it on logout or when it is found expired. Other containers
//! only ever ask for the current bearer through [`SessionState::bearer`].

mod claims;

pub use claims::{TokenClaims, decode_claims};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::errors::{Result, TinylinkError};
use crate::storage::{PersistentStore, TOKEN_KEY};

/// Where the route guard sends unauthenticated users
pub const LOGIN_ROUTE: &str = "/login";

/// Identity derived from the token claims
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Outcome of the route guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
}

impl RouteDecision {
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::RedirectToLogin => Some(LOGIN_ROUTE),
        }
    }
}

pub struct SessionState {
    store: Arc<dyn PersistentStore>,
    token: RwLock<Option<String>>,
    /// `true` while a token is held; re-sent on every login
    authenticated: watch::Sender<bool>,
}

impl SessionState {
    /// Build the session, reading the persisted token once
    pub fn new(store: Arc<dyn PersistentStore>) -> Self {
        let token = match store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read persisted token: {}", e);
                None
            }
        };

        debug!("Session restored: authenticated={}", token.is_some());
        let (authenticated, _) = watch::channel(token.is_some());

        Self {
            store,
            token: RwLock::new(token),
            authenticated,
        }
    }

    /// Store and persist a token
    ///
    /// The token must decode structurally; its expiry is not checked here.
    pub fn login(&self, token: &str) -> Result<()> {
        let token = token.trim();
        decode_claims(token)?;

        self.store.set(TOKEN_KEY, token)?;
        *self.token.write() = Some(token.to_string());
        self.authenticated.send_replace(true);

        info!("Logged in");
        Ok(())
    }

    /// Clear the token from memory and from the persisted store
    ///
    /// Safe to call when already logged out.
    pub fn logout(&self) {
        let had_token = self.token.write().take().is_some();

        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!("Failed to remove persisted token: {}", e);
        }

        self.authenticated.send_if_modified(|state| {
            let changed = *state;
            *state = false;
            changed
        });

        if had_token {
            info!("Logged out");
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// The current bearer, or the fixed "not logged in" failure
    pub fn bearer(&self) -> Result<String> {
        self.token().ok_or_else(TinylinkError::unauthenticated)
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        self.token
            .read()
            .as_deref()
            .and_then(|t| decode_claims(t).ok())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims().and_then(|c| c.expires_at())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.claims().map(|c| SessionUser {
            id: c.id.or(c.sub),
            email: c.email,
            name: c.name,
        })
    }

    /// Whether the held token decodes and has not expired
    ///
    /// Decode failures count as invalid and never surface as errors.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match self.claims() {
            Some(claims) => !claims.is_expired_at(now),
            None => false,
        }
    }

    /// Gate protected content; an expired or undecodable token is logged out
    pub fn guard(&self) -> RouteDecision {
        self.guard_at(Utc::now())
    }

    pub fn guard_at(&self, now: DateTime<Utc>) -> RouteDecision {
        if !self.is_authenticated() {
            return RouteDecision::RedirectToLogin;
        }

        if self.is_valid_at(now) {
            RouteDecision::Allow
        } else {
            warn!("Session token expired or invalid, logging out");
            self.logout();
            RouteDecision::RedirectToLogin
        }
    }

    /// Observe login/logout transitions
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token_expiring_at(exp: i64) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{},"id":"u1"}}"#, exp))
        )
    }

    #[test]
    fn test_login_persists_and_logout_clears() {
        let store = MemoryStore::arc();
        let session = SessionState::new(store.clone());
        let token = token_expiring_at(4_000_000_000);

        session.login(&token).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), Some(token.clone()));
        assert_eq!(session.bearer().unwrap(), token);

        session.logout();
        session.logout();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(session.bearer().unwrap_err(), TinylinkError::unauthenticated());
    }

    #[test]
    fn test_token_restored_from_store() {
        let token = token_expiring_at(4_000_000_000);
        let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, token.as_str())]));
        let session = SessionState::new(store);
        assert_eq!(session.token(), Some(token));
        assert_eq!(
            session.user().unwrap().id.as_deref(),
            Some("u1")
        );
    }

    #[test]
    fn test_login_rejects_undecodable_token() {
        let store = MemoryStore::arc();
        let session = SessionState::new(store.clone());
        assert!(session.login("definitely-not-a-jwt").is_err());
        assert!(!session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_guard_logs_out_expired_session() {
        let store = MemoryStore::arc();
        let session = SessionState::new(store.clone());
        session.login(&token_expiring_at(1_000)).unwrap();

        assert!(!session.is_valid());
        assert_eq!(session.guard(), RouteDecision::RedirectToLogin);
        assert!(!session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_guard_allows_live_session() {
        let session = SessionState::new(MemoryStore::arc());
        session.login(&token_expiring_at(4_000_000_000)).unwrap();
        assert_eq!(session.guard(), RouteDecision::Allow);
        assert_eq!(RouteDecision::Allow.redirect_target(), None);
    }

    #[test]
    fn test_subscribe_sees_transitions() {
        let session = SessionState::new(MemoryStore::arc());
        let mut rx = session.subscribe();
        assert!(!*rx.borrow_and_update());

        session.login(&token_expiring_at(4_000_000_000)).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        session.logout();
        assert!(rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());

        session.logout();
        assert!(!rx.has_changed().unwrap());
    }
}
