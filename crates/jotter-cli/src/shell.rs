//! Interactive session: one long-lived controller driven by typed commands.

use std::io::{self, Write};
use std::time::Instant;

use jotter_core::models::parse_category_list;
use jotter_core::{Credentials, Dispatch, Intent, NoteDraft, NoteFilter, View};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::common::{build_controller, parse_note_id, resolve_profile, CliController};
use crate::error::CliError;
use crate::views::{describe_view, ignored_hint, render, render_screen};

const HELP: &str = "\
Commands:
  login <username> <password>   sign in
  quick                         sign in with the profile's demo account
  register <username> <password> create an account
  logout                        sign out
  view login|register           switch auth screen
  list [all|active|archived]    show notes
  new                           open an empty note form
  edit <id>                     open a note in the form
  title <text>                  set the form title
  content <text>                set the form content
  categories <a, b, ...>        set the form categories
  save                          submit the form
  delete|archive|unarchive <id> act on a note
  dismiss                       hide the error message
  help                          show this text
  quit                          leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Intent(Intent),
    SetTitle(String),
    SetContent(String),
    SetCategories(Vec<String>),
    Save,
    Help,
    Quit,
    Redraw,
}

/// Parse one input line. Errors are usage messages for the user.
pub fn parse_shell_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    let note_id = |usage: &str| {
        if rest.is_empty() {
            return Err(format!("usage: {usage} <id>"));
        }
        parse_note_id(rest).map_err(|error| error.to_string())
    };

    let command = match command.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Redraw,
        "login" => ShellCommand::Intent(Intent::Login(parse_credentials(rest, "login")?)),
        "register" => ShellCommand::Intent(Intent::Register(parse_credentials(rest, "register")?)),
        "quick" => ShellCommand::Intent(Intent::QuickLogin),
        "logout" => ShellCommand::Intent(Intent::Logout),
        "view" => match rest.to_ascii_lowercase().as_str() {
            "login" => ShellCommand::Intent(Intent::SelectView(View::Login)),
            "register" => ShellCommand::Intent(Intent::SelectView(View::Register)),
            _ => return Err("usage: view login|register".to_string()),
        },
        "list" | "ls" => {
            let filter = if rest.is_empty() {
                NoteFilter::All
            } else {
                rest.parse::<NoteFilter>()?
            };
            ShellCommand::Intent(Intent::SelectView(View::List(filter)))
        }
        "new" => ShellCommand::Intent(Intent::SelectView(View::CreateForm)),
        "edit" => ShellCommand::Intent(Intent::EditNote(note_id("edit")?)),
        "delete" | "rm" => ShellCommand::Intent(Intent::Delete(note_id("delete")?)),
        "archive" => ShellCommand::Intent(Intent::Archive(note_id("archive")?)),
        "unarchive" => ShellCommand::Intent(Intent::Unarchive(note_id("unarchive")?)),
        "dismiss" => ShellCommand::Intent(Intent::DismissError),
        "title" => ShellCommand::SetTitle(rest.to_string()),
        "content" => ShellCommand::SetContent(rest.replace("\\n", "\n")),
        "categories" => ShellCommand::SetCategories(parse_category_list(rest)),
        "save" => ShellCommand::Save,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try `help`)")),
    };
    Ok(command)
}

fn parse_credentials(rest: &str, usage: &str) -> Result<Credentials, String> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(username), Some(password), None) => Ok(Credentials::new(username, password)),
        _ => Err(format!("usage: {usage} <username> <password>")),
    }
}

/// Form submission for the current view, if it is a form.
pub fn submit_intent(view: View, draft: &NoteDraft) -> Option<Intent> {
    match view {
        View::CreateForm => Some(Intent::SubmitCreate(draft.clone())),
        View::EditForm(id) => Some(Intent::SubmitEdit(id, draft.clone())),
        _ => None,
    }
}

const fn is_form(view: View) -> bool {
    matches!(view, View::CreateForm | View::EditForm(_))
}

pub async fn run_shell(global_profile: Option<&str>) -> Result<(), CliError> {
    let (profile_name, profile) = resolve_profile(global_profile)?;
    let mut controller = build_controller(&profile_name, &profile)?;
    controller.restore().await;

    println!("jotter shell (profile '{profile_name}'), type `help` for commands");
    print!("{}", render(&controller, Instant::now()));

    let mut draft = controller.form().clone();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}> ", describe_view(controller.view()));
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        controller.expire_error(Instant::now());

        match parse_shell_command(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(ShellCommand::Redraw) => {}
            Ok(ShellCommand::Intent(intent)) => {
                if !dispatch(&mut controller, &mut draft, intent).await {
                    continue;
                }
            }
            Ok(ShellCommand::SetTitle(title)) if is_form(controller.view()) => draft.title = title,
            Ok(ShellCommand::SetContent(content)) if is_form(controller.view()) => {
                draft.content = content;
            }
            Ok(ShellCommand::SetCategories(names)) if is_form(controller.view()) => {
                draft.category_names = names;
            }
            Ok(ShellCommand::Save) => match submit_intent(controller.view(), &draft) {
                Some(intent) => {
                    if !dispatch(&mut controller, &mut draft, intent).await {
                        continue;
                    }
                }
                None => {
                    println!("Open a form with `new` or `edit <id>` first");
                    continue;
                }
            },
            Ok(_) => {
                println!("Open a form with `new` or `edit <id>` first");
                continue;
            }
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        }

        print!("{}", render_screen(&controller, &draft, Instant::now()));
    }

    Ok(())
}

/// Text printed instead of a redraw when an intent changed nothing.
pub fn outcome_hint(outcome: Dispatch, view: View) -> Option<String> {
    (outcome == Dispatch::Ignored).then(|| ignored_hint(view))
}

/// Returns false when the intent was ignored and the screen is unchanged.
async fn dispatch(controller: &mut CliController, draft: &mut NoteDraft, intent: Intent) -> bool {
    let outcome = controller.dispatch(intent).await;
    tracing::debug!("Shell dispatch finished: {:?}", outcome);
    if let Some(hint) = outcome_hint(outcome, controller.view()) {
        println!("{hint}");
        return false;
    }
    if outcome.is_applied() && is_form(controller.view()) {
        draft.clone_from(controller.form());
    }
    true
}
