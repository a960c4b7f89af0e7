//! API client configuration.
//!
//! `ClientConfig` carries the backend base URL plus the handful of routes
//! whose path differs between backend deployments (the legacy
//! `*-resource` endpoints versus the `/api/*` ones).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::util::{is_http_url, normalize_path, normalize_text_option};

pub const DEFAULT_AUTH_PATH: &str = "/auth-resource";
pub const DEFAULT_REGISTER_PATH: &str = "/register-resource";
pub const DEFAULT_CREATE_NOTE_PATH: &str = "/api/notes";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Routes that vary per backend deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRoutes {
    pub auth: String,
    pub register: String,
    pub create_note: String,
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self {
            auth: DEFAULT_AUTH_PATH.to_string(),
            register: DEFAULT_REGISTER_PATH.to_string(),
            create_note: DEFAULT_CREATE_NOTE_PATH.to_string(),
        }
    }
}

impl ApiRoutes {
    /// Default routes with optional per-field overrides; blanks are ignored.
    #[must_use]
    pub fn with_overrides(
        auth: Option<String>,
        register: Option<String>,
        create_note: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            auth: normalize_text_option(auth).map_or(defaults.auth, |path| normalize_path(&path)),
            register: normalize_text_option(register)
                .map_or(defaults.register, |path| normalize_path(&path)),
            create_note: normalize_text_option(create_note)
                .map_or(defaults.create_note, |path| normalize_path(&path)),
        }
    }
}

/// Everything the HTTP client needs besides the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    pub routes: ApiRoutes,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            routes: ApiRoutes::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn with_routes(mut self, routes: ApiRoutes) -> Self {
        self.routes = routes;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a relative API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize_path(path))
    }
}

/// Trim and validate an API base URL, dropping any trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(ApiError::InvalidConfiguration(
            "API base URL must not be empty",
        ));
    }
    if !is_http_url(&base) {
        return Err(ApiError::InvalidConfiguration(
            "API base URL must include http:// or https://",
        ));
    }
    Ok(base)
}
