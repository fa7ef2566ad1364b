//! Student sessions.
//!
//! A session is nothing more than an unexpired entry keyed by an opaque id;
//! its presence is the "authenticated" flag. The id travels in a signed
//! cookie whose key is derived from the configured session secret.

use async_trait::async_trait;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha256, Sha512};
use thiserror::Error;

use crate::error::PortalError;

pub mod memory;

pub use memory::MemorySessionStore;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "portal_session";

pub type SessionId = String;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session backend unavailable: {0}")]
    Backend(String),
}

/// Storage for authenticated sessions, injected into the router state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a new authenticated session and return its id.
    async fn create(&self) -> Result<SessionId, SessionError>;

    /// Whether `id` names a live session. Expired sessions count as absent.
    async fn is_authenticated(&self, id: &str) -> Result<bool, SessionError>;

    /// End a session. Unknown ids are ignored.
    async fn destroy(&self, id: &str) -> Result<(), SessionError>;

    /// Drop every expired session, returning how many were removed.
    async fn purge_expired(&self) -> Result<usize, SessionError>;
}

/// Login gate state for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Anonymous,
    Authenticated,
}

impl LoginState {
    /// Check a submitted password. A mismatch changes nothing: the caller's
    /// current state, and any session behind it, stays as it was.
    pub fn submit(submitted: &str, class_password: &str) -> Result<LoginState, PortalError> {
        if passwords_match(submitted, class_password) {
            Ok(LoginState::Authenticated)
        } else {
            Err(PortalError::WrongPassword)
        }
    }

    pub fn logout(self) -> LoginState {
        LoginState::Anonymous
    }

    pub fn is_authenticated(self) -> bool {
        self == LoginState::Authenticated
    }
}

/// Exact string match that does not short-circuit on the first differing byte.
pub fn passwords_match(submitted: &str, expected: &str) -> bool {
    let a = Sha256::digest(submitted.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Derive the 64-byte cookie signing key from the session secret.
pub fn cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
