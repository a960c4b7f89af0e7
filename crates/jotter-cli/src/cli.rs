use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use jotter_core::NoteFilter;

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "Take notes against a remote notes API from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name (API endpoint, routes and stored token)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token in the keychain
    Login {
        /// Account username
        #[arg(long, short, value_name = "USERNAME", required_unless_present = "quick")]
        username: Option<String>,
        /// Account password
        #[arg(long, short, value_name = "PASSWORD", required_unless_present = "quick")]
        password: Option<String>,
        /// Use the profile's quick-login demo account
        #[arg(long, conflicts_with_all = ["username", "password"])]
        quick: bool,
    },
    /// Create an account and sign in
    Register {
        /// Account username
        #[arg(long, short, value_name = "USERNAME")]
        username: String,
        /// Account password
        #[arg(long, short, value_name = "PASSWORD")]
        password: String,
    },
    /// Sign out and clear the stored token
    Logout,
    /// Show whether the profile holds a session token
    Status,
    /// List notes
    List {
        /// Which notes to show
        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long)]
        title: String,
        /// Category name (repeatable)
        #[arg(short, long = "category", value_name = "NAME")]
        categories: Vec<String>,
        /// Note content (stdin or $EDITOR when omitted)
        content: Vec<String>,
    },
    /// Edit an existing note
    Edit {
        /// Note ID
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New content
        #[arg(long)]
        content: Option<String>,
        /// Replace categories (repeatable)
        #[arg(short, long = "category", value_name = "NAME")]
        categories: Vec<String>,
        /// Remove all categories
        #[arg(long, conflicts_with = "categories")]
        clear_categories: bool,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
    /// Archive a note
    Archive {
        /// Note ID
        id: String,
    },
    /// Move an archived note back to the active list
    Unarchive {
        /// Note ID
        id: String,
    },
    /// Interactive session
    Shell,
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FilterArg {
    All,
    Active,
    Archived,
}

impl From<FilterArg> for NoteFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => Self::All,
            FilterArg::Active => Self::Active,
            FilterArg::Archived => Self::Archived,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Notes API base URL
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
        /// Login endpoint path (default /auth-resource)
        #[arg(long, value_name = "PATH")]
        auth_path: Option<String>,
        /// Registration endpoint path (default /register-resource)
        #[arg(long, value_name = "PATH")]
        register_path: Option<String>,
        /// Note creation endpoint path (default /api/notes)
        #[arg(long, value_name = "PATH")]
        create_note_path: Option<String>,
        /// Username for `jotter login --quick`
        #[arg(long, value_name = "USERNAME")]
        quick_login_username: Option<String>,
        /// Password for `jotter login --quick`
        #[arg(long, value_name = "PASSWORD")]
        quick_login_password: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved profile configuration
    Show,
}
