use jotter_core::config::normalize_base_url;
use jotter_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

/// Values passed to `config init`; unset fields keep the stored value.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub api_url: Option<String>,
    pub auth_path: Option<String>,
    pub register_path: Option<String>,
    pub create_note_path: Option<String>,
    pub quick_login_username: Option<String>,
    pub quick_login_password: Option<String>,
}

impl ProfileUpdate {
    pub fn apply_to(self, profile: &mut CliProfile) -> Result<(), CliError> {
        if let Some(url) = normalize_text_option(self.api_url) {
            profile.api_base_url = Some(normalize_base_url(&url)?);
        }
        if let Some(path) = normalize_text_option(self.auth_path) {
            profile.auth_path = Some(path);
        }
        if let Some(path) = normalize_text_option(self.register_path) {
            profile.register_path = Some(path);
        }
        if let Some(path) = normalize_text_option(self.create_note_path) {
            profile.create_note_path = Some(path);
        }
        if let Some(username) = normalize_text_option(self.quick_login_username) {
            profile.quick_login_username = Some(username);
        }
        if let Some(password) = self.quick_login_password.filter(|value| !value.is_empty()) {
            profile.quick_login_password = Some(password);
        }
        Ok(())
    }
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_url,
            auth_path,
            register_path,
            create_note_path,
            quick_login_username,
            quick_login_password,
            no_activate,
        } => run_config_init(
            global_profile,
            ProfileUpdate {
                api_url,
                auth_path,
                register_path,
                create_note_path,
                quick_login_username,
                quick_login_password,
            },
            no_activate,
        ),
        ConfigCommands::Show => run_config_show(global_profile),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    update: ProfileUpdate,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_name);

    let profile = config.profile_mut_or_default(&profile_name);
    update.apply_to(profile)?;
    let missing_url = profile.api_base_url().is_none();

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save()?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    if missing_url {
        println!("Profile '{profile_name}' is missing: api_base_url");
    } else {
        println!(
            "Profile '{profile_name}' is ready. Run `jotter login --username <USERNAME> --password <PASSWORD>`."
        );
    }

    Ok(())
}

pub fn run_config_show(global_profile: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(global_profile);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    println!("{}", describe_profile(&profile_name, &profile));
    Ok(())
}

/// Human-readable profile summary; the quick-login password is never printed.
pub fn describe_profile(profile_name: &str, profile: &CliProfile) -> String {
    let routes = profile.routes();
    let api_url = profile
        .api_base_url()
        .unwrap_or_else(|| "(not set)".to_string());
    let quick_login = profile
        .quick_login()
        .map_or_else(|| "(disabled)".to_string(), |credentials| credentials.username);

    [
        format!("profile:       {profile_name}"),
        format!("api_base_url:  {api_url}"),
        format!("auth_path:     {}", routes.auth),
        format!("register_path: {}", routes.register),
        format!("create_path:   {}", routes.create_note),
        format!("quick_login:   {quick_login}"),
    ]
    .join("\n")
}
