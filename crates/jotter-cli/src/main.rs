//! Jotter CLI - terminal client for a remote note-taking API
//!
//! One-shot subcommands for scripting plus an interactive shell.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;
mod shell;
mod views;


use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::archive::{run_archive, run_unarchive};
use crate::commands::auth_cmd::{run_authenticate, run_logout, run_status, AuthAction};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, EditChanges};
use crate::commands::list::{run_categories, run_list};
use crate::error::CliError;
use crate::shell::run_shell;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "jotter=warn".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Some(Commands::Login {
            username,
            password,
            quick,
        }) => {
            let action = if quick {
                AuthAction::QuickLogin
            } else {
                AuthAction::Login
            };
            run_authenticate(action, username, password, profile).await?;
        }
        Some(Commands::Register { username, password }) => {
            run_authenticate(AuthAction::Register, Some(username), Some(password), profile)
                .await?;
        }
        Some(Commands::Logout) => run_logout(profile).await?,
        Some(Commands::Status) => run_status(profile)?,
        Some(Commands::List { filter, json }) => run_list(filter.into(), json, profile).await?,
        Some(Commands::Categories { json }) => run_categories(json, profile).await?,
        Some(Commands::Add {
            title,
            categories,
            content,
        }) => run_add(&title, &categories, &content, profile).await?,
        Some(Commands::Edit {
            id,
            title,
            content,
            categories,
            clear_categories,
        }) => {
            let changes = EditChanges {
                title,
                content,
                categories,
                clear_categories,
            };
            run_edit(&id, changes, profile).await?;
        }
        Some(Commands::Delete { id }) => run_delete(&id, profile).await?,
        Some(Commands::Archive { id }) => run_archive(&id, profile).await?,
        Some(Commands::Unarchive { id }) => run_unarchive(&id, profile).await?,
        Some(Commands::Shell) => run_shell(profile).await?,
        Some(Commands::Config { command }) => run_config(command, profile)?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
