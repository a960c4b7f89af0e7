//! Session token persistence in the OS keychain, one entry per profile.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use jotter_core::session::TOKEN_STORAGE_KEY;
use jotter_core::{ApiError, AuthToken, CredentialStore, Result};

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "jotter";

#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    username: String,
}

impl KeyringCredentialStore {
    pub fn for_profile(profile_name: &str) -> Self {
        Self {
            username: format!("{TOKEN_STORAGE_KEY}:{profile_name}"),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| ApiError::CredentialStorage(error.to_string()))
    }
}

impl CredentialStore for KeyringCredentialStore {
    #[cfg(not(test))]
    fn load_token(&self) -> Result<Option<AuthToken>> {
        match self.entry()?.get_password() {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => Ok(Some(AuthToken::new(raw))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(ApiError::CredentialStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn load_token(&self) -> Result<Option<AuthToken>> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| ApiError::CredentialStorage(error.to_string()))?;
        Ok(guard.get(&self.username).cloned().map(AuthToken::new))
    }

    #[cfg(not(test))]
    fn save_token(&self, token: &AuthToken) -> Result<()> {
        self.entry()?
            .set_password(token.expose())
            .map_err(|error| ApiError::CredentialStorage(error.to_string()))
    }

    #[cfg(test)]
    fn save_token(&self, token: &AuthToken) -> Result<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| ApiError::CredentialStorage(error.to_string()))?;
        guard.insert(self.username.clone(), token.expose().to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_token(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(ApiError::CredentialStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn clear_token(&self) -> Result<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| ApiError::CredentialStorage(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}
