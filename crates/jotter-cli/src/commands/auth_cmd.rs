use jotter_core::{CredentialStore, Credentials, Intent};

use crate::auth::KeyringCredentialStore;
use crate::commands::common::{build_controller, resolve_profile, run_intent};
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    QuickLogin,
    Register,
}

pub async fn run_authenticate(
    action: AuthAction,
    username: Option<String>,
    password: Option<String>,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let (profile_name, profile) = resolve_profile(global_profile)?;
    let mut controller = build_controller(&profile_name, &profile)?;

    let credentials = || {
        Credentials::new(
            username.clone().unwrap_or_default(),
            password.clone().unwrap_or_default(),
        )
    };
    let intent = match action {
        AuthAction::Login => Intent::Login(credentials()),
        AuthAction::QuickLogin => Intent::QuickLogin,
        AuthAction::Register => Intent::Register(credentials()),
    };
    run_intent(&mut controller, intent).await?;

    println!(
        "Signed in profile '{profile_name}' ({} notes)",
        controller.notes().len()
    );
    Ok(())
}

pub async fn run_logout(global_profile: Option<&str>) -> Result<(), CliError> {
    let (profile_name, profile) = resolve_profile(global_profile)?;
    match build_controller(&profile_name, &profile) {
        Ok(mut controller) => run_intent(&mut controller, Intent::Logout).await?,
        // Without an API URL there is no controller, but the token can still go.
        Err(CliError::ApiNotConfigured) => {
            KeyringCredentialStore::for_profile(&profile_name).clear_token()?;
        }
        Err(error) => return Err(error),
    }
    println!("Signed out profile '{profile_name}'");
    Ok(())
}

pub fn run_status(global_profile: Option<&str>) -> Result<(), CliError> {
    let (profile_name, profile) = resolve_profile(global_profile)?;
    let api_label = profile
        .api_base_url()
        .unwrap_or_else(|| "no API configured".to_string());

    if KeyringCredentialStore::for_profile(&profile_name).load_token()?.is_some() {
        println!("Profile '{profile_name}' is signed in ({api_label})");
    } else {
        println!("Profile '{profile_name}' is not signed in ({api_label})");
    }
    Ok(())
}
