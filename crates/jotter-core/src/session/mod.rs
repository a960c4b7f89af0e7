//! Credential storage for the bearer token.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{ApiError, Result};

/// Fixed storage key the token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Opaque bearer credential issued by the auth endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("AuthToken([REDACTED])")
    }
}

/// Durable home of the single session token.
///
/// Clones must share the same underlying storage: the API client and the
/// view controller each hold one.
pub trait CredentialStore: Clone + Send + Sync + 'static {
    fn load_token(&self) -> Result<Option<AuthToken>>;
    fn save_token(&self, token: &AuthToken) -> Result<()>;
    fn clear_token(&self) -> Result<()>;

    fn has_token(&self) -> bool {
        matches!(self.load_token(), Ok(Some(_)))
    }
}

/// In-process store; the token lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    token: Arc<Mutex<Option<AuthToken>>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(AuthToken::new(token)))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load_token(&self) -> Result<Option<AuthToken>> {
        let guard = self
            .token
            .lock()
            .map_err(|error| ApiError::CredentialStorage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save_token(&self, token: &AuthToken) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|error| ApiError::CredentialStorage(error.to_string()))?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|error| ApiError::CredentialStorage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}
