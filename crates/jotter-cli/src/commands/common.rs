use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use jotter_core::{Dispatch, Intent, Note, NoteId, NotesApiClient, ViewController};
use serde::Serialize;

use crate::auth::KeyringCredentialStore;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;
use crate::views::ignored_hint;

pub type CliController =
    ViewController<NotesApiClient<KeyringCredentialStore>, KeyringCredentialStore>;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub categories: Vec<String>,
    pub archived: bool,
}

/// Resolved profile name plus its settings (empty when not configured).
pub fn resolve_profile(global_profile: Option<&str>) -> Result<(String, CliProfile), CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(global_profile);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    Ok((profile_name, profile))
}

pub fn build_controller(profile_name: &str, profile: &CliProfile) -> Result<CliController, CliError> {
    let store = KeyringCredentialStore::for_profile(profile_name);
    let client = NotesApiClient::new(profile.client_config()?, store.clone())?;
    let controller = ViewController::new(client, store);
    Ok(match profile.quick_login() {
        Some(credentials) => controller.with_quick_login(credentials),
        None => controller,
    })
}

/// Controller resumed from the stored token, with the full note list loaded.
pub async fn signed_in_controller(global_profile: Option<&str>) -> Result<CliController, CliError> {
    let (profile_name, profile) = resolve_profile(global_profile)?;
    let mut controller = build_controller(&profile_name, &profile)?;
    if controller.restore().await == Dispatch::Ignored {
        return Err(CliError::NotSignedIn(profile_name));
    }
    if let Some(message) = controller.visible_error(Instant::now()) {
        return Err(CliError::Rejected(message.to_string()));
    }
    Ok(controller)
}

/// Dispatch one intent and turn the outcome into a command result.
///
/// A banner raised by an applied intent (a failed refetch after a mutation)
/// is reported on stderr without failing the command.
pub async fn run_intent(controller: &mut CliController, intent: Intent) -> Result<(), CliError> {
    match controller.dispatch(intent).await {
        Dispatch::Applied => {
            if let Some(message) = controller.visible_error(Instant::now()) {
                eprintln!("Warning: {message}");
            }
            Ok(())
        }
        Dispatch::Failed => Err(CliError::Rejected(
            controller
                .visible_error(Instant::now())
                .unwrap_or("Request failed")
                .to_string(),
        )),
        Dispatch::Ignored => Err(CliError::Ignored(ignored_hint(controller.view()))),
    }
}

pub fn parse_note_id(raw: &str) -> Result<NoteId, CliError> {
    raw.parse::<NoteId>()
        .map_err(|_| CliError::InvalidNoteId(raw.trim().to_string()))
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let title = truncate_chars(&note.title, 24);
            let preview = note_preview(note, 40);
            let mut line = format!("{:>5}  {title:<24}  {preview:<40}", note.id.value());
            let categories = render_categories(note);
            if !categories.is_empty() {
                line.push_str("  ");
                line.push_str(&categories);
            }
            if note.archived {
                line.push_str("  [archived]");
            }
            line.trim_end().to_string()
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.value(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        categories: note.category_names(),
        archived: note.archived,
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, max_chars)
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = value.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn render_categories(note: &Note) -> String {
    note.category_names()
        .into_iter()
        .map(|name| format!("#{name}"))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input_with_initial("")? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    let status = match Command::new(editor).arg(file_path).status() {
        Ok(status) => status,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // EDITOR may carry arguments, e.g. "code --wait".
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };
            Command::new(program).args(parts).arg(file_path).status()?
        }
        Err(err) => return Err(CliError::Io(err)),
    };

    if status.success() {
        Ok(())
    } else {
        Err(CliError::EditorFailed(format!(
            "`{editor}` exited with status {status}"
        )))
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("jotter-note-{}-{now}.md", std::process::id()))
}
