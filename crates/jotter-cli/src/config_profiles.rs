//! Persistent CLI profile configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jotter_core::util::normalize_text_option;
use jotter_core::{ApiRoutes, ClientConfig, Credentials};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";
pub const PROFILE_ENV: &str = "JOTTER_PROFILE";
pub const API_URL_ENV: &str = "JOTTER_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfilesConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, CliProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfile {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub auth_path: Option<String>,
    #[serde(default)]
    pub register_path: Option<String>,
    #[serde(default)]
    pub create_note_path: Option<String>,
    #[serde(default)]
    pub quick_login_username: Option<String>,
    #[serde(default)]
    pub quick_login_password: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("jotter").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI config directory".to_string()))
}

pub fn normalize_profile_name(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl CliProfilesConfig {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {error}",
                path.display()
            ))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {error}",
                path.display()
            ))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {error}",
                    parent.display()
                ))
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized).map_err(|error| {
            CliError::Config(format!(
                "Failed to write config at {}: {error}",
                path.display()
            ))
        })
    }

    /// `--profile`, then `JOTTER_PROFILE`, then the active profile, then `default`.
    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> String {
        self.resolve_profile_name_with_env(explicit, std::env::var(PROFILE_ENV).ok().as_deref())
    }

    fn resolve_profile_name_with_env(&self, explicit: Option<&str>, env: Option<&str>) -> String {
        normalize_profile_name(explicit)
            .or_else(|| normalize_profile_name(env))
            .or_else(|| normalize_profile_name(self.active_profile.as_deref()))
            .unwrap_or_else(|| "default".to_string())
    }

    pub fn profile(&self, name: &str) -> Option<&CliProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut_or_default(&mut self, name: &str) -> &mut CliProfile {
        self.profiles.entry(name.to_string()).or_default()
    }

    fn normalize(&mut self) {
        self.active_profile = normalize_profile_name(self.active_profile.as_deref());
        for profile in self.profiles.values_mut() {
            profile.normalize();
        }
    }
}

impl CliProfile {
    /// Base URL from `JOTTER_API_URL` if set, otherwise from the profile.
    pub fn api_base_url(&self) -> Option<String> {
        self.api_base_url_with_env(std::env::var(API_URL_ENV).ok())
    }

    fn api_base_url_with_env(&self, env: Option<String>) -> Option<String> {
        normalize_text_option(env).or_else(|| normalize_text_option(self.api_base_url.clone()))
    }

    pub fn routes(&self) -> ApiRoutes {
        ApiRoutes::with_overrides(
            self.auth_path.clone(),
            self.register_path.clone(),
            self.create_note_path.clone(),
        )
    }

    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        let base_url = self.api_base_url().ok_or(CliError::ApiNotConfigured)?;
        Ok(ClientConfig::new(base_url)?.with_routes(self.routes()))
    }

    /// Quick-login account, only when both halves are configured.
    pub fn quick_login(&self) -> Option<Credentials> {
        let username = normalize_text_option(self.quick_login_username.clone())?;
        let password = self.quick_login_password.clone().filter(|value| !value.is_empty())?;
        Some(Credentials::new(username, password))
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.clone())
            .map(|url| url.trim_end_matches('/').to_string());
        self.auth_path = normalize_text_option(self.auth_path.clone());
        self.register_path = normalize_text_option(self.register_path.clone());
        self.create_note_path = normalize_text_option(self.create_note_path.clone());
        self.quick_login_username = normalize_text_option(self.quick_login_username.clone());
    }
}
