//! Administrator session gate.
//!
//! Two states, [`SessionState::Anonymous`] and [`SessionState::Authenticated`].
//! A successful login writes a fixed marker under [`AUTH_TOKEN_KEY`] in the
//! injected key/value store; logout removes it. There is no expiry and no
//! per-user identity.
//!
//! The bundled [`StaticCredentials`] verifier compares against one shared
//! username/password pair. It gates the admin screens of a single-operator
//! install and is not an authentication system; put a real identity
//! provider behind [`CredentialVerifier`] for anything exposed publicly.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::error::SessionError;
use crate::persistence::{KeyValueStore, AUTH_TOKEN_KEY};

/// Marker value stored while a session is authenticated.
pub const AUTHENTICATED_MARKER: &str = "authenticated";

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "pass";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Login form input.
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    fn is_blank(&self) -> bool {
        self.username.trim().is_empty() || self.password.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Decides whether a credential pair may administer the library.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credentials: &Credentials) -> bool;
}

/// One compiled-in or configured username/password pair.
pub struct StaticCredentials {
    username: String,
    password: SecretString,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADMIN_USERNAME,
            SecretString::from(DEFAULT_ADMIN_PASSWORD.to_string()),
        )
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, credentials: &Credentials) -> bool {
        credentials.username == self.username
            && credentials.password.expose_secret() == self.password.expose_secret()
    }
}

pub struct SessionGate {
    store: Arc<dyn KeyValueStore>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl SessionGate {
    pub fn new(store: Arc<dyn KeyValueStore>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { store, verifier }
    }

    /// Gate with the default `admin` / `pass` pair.
    pub fn with_default_credentials(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, Arc::new(StaticCredentials::default()))
    }

    /// Returns `Ok(false)` and leaves state untouched on rejected credentials.
    pub fn login(&self, credentials: &Credentials) -> Result<bool, SessionError> {
        if credentials.is_blank() {
            log::debug!("Login rejected: empty credentials");
            return Ok(false);
        }

        if !self.verifier.verify(credentials) {
            log::warn!("Login rejected for user '{}'", credentials.username);
            return Ok(false);
        }

        self.store.set(AUTH_TOKEN_KEY, AUTHENTICATED_MARKER)?;
        log::info!("Administrator '{}' logged in", credentials.username);
        Ok(true)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        log::info!("Administrator logged out");
        Ok(())
    }

    /// Pure read of the marker. An unreadable store reads as anonymous.
    pub fn is_authenticated(&self) -> bool {
        match self.store.get(AUTH_TOKEN_KEY) {
            Ok(marker) => marker.as_deref() == Some(AUTHENTICATED_MARKER),
            Err(e) => {
                log::warn!("Failed to read session marker: {}", e);
                false
            }
        }
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}
