//! Login/registration credentials

use std::fmt;

use serde::Serialize;

use crate::error::{ApiError, Result};

/// Username and password sent to the auth endpoints
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    #[serde(rename = "userName")]
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are required; the username is trimmed, the password is kept verbatim.
    pub fn validated(&self) -> Result<Self> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ApiError::validation("Username is required"));
        }
        if self.password.trim().is_empty() {
            return Err(ApiError::validation("Password is required"));
        }
        Ok(Self::new(username, self.password.clone()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
