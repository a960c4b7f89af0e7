//! Terminal renderers for each controller view.
//!
//! Renderers are pure: they read controller state and return text. User
//! input is turned into intents by the shell, never here.

use std::fmt::Write as _;
use std::time::Instant;

use jotter_core::{
    Category, CredentialStore, Note, NoteDraft, NoteFilter, NotesBackend, View, ViewController,
};

use crate::commands::common::format_note_lines;

pub fn describe_view(view: View) -> String {
    match view {
        View::Login => "login".to_string(),
        View::Register => "register".to_string(),
        View::List(filter) => format!("{filter} notes"),
        View::CreateForm => "new note".to_string(),
        View::EditForm(id) => format!("edit note {id}"),
    }
}

/// Shown when the controller drops an intent that has no effect in `view`.
pub fn ignored_hint(view: View) -> String {
    format!("Nothing to do from the {} view", describe_view(view))
}

pub fn render_login(quick_login_available: bool) -> String {
    let mut out = String::from("== Sign in ==\n");
    out.push_str("  login <username> <password>\n");
    if quick_login_available {
        out.push_str("  quick                        sign in with the demo account\n");
    }
    out.push_str("  view register                create an account instead\n");
    out
}

pub fn render_register() -> String {
    let mut out = String::from("== Create account ==\n");
    out.push_str("  register <username> <password>\n");
    out.push_str("  view login                   back to sign in\n");
    out
}

pub fn render_note_form(view: View, form: &NoteDraft, categories: &[Category]) -> String {
    let heading = match view {
        View::EditForm(id) => format!("== Edit note {id} =="),
        _ => "== New note ==".to_string(),
    };
    let mut out = heading;
    out.push('\n');

    let _ = writeln!(out, "  title:      {}", placeholder(&form.title));
    if form.content.is_empty() {
        let _ = writeln!(out, "  content:    (empty)");
    } else {
        let mut lines = form.content.lines();
        let _ = writeln!(out, "  content:    {}", lines.next().unwrap_or(""));
        for line in lines {
            let _ = writeln!(out, "              {line}");
        }
    }
    let selected = if form.category_names.is_empty() {
        "(none)".to_string()
    } else {
        form.category_names.join(", ")
    };
    let _ = writeln!(out, "  categories: {selected}");

    if !categories.is_empty() {
        let available = categories
            .iter()
            .map(|category| category.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  available:  {available}");
    }
    out.push_str("  title <text> | content <text> | categories <a, b> | save | list\n");
    out
}

pub fn render_note_list(filter: NoteFilter, notes: &[Note]) -> String {
    let mut out = String::new();
    let tabs = NoteFilter::ALL
        .iter()
        .map(|candidate| {
            if *candidate == filter {
                format!("[{candidate}]")
            } else {
                candidate.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "== Notes: {tabs} ==");

    if notes.is_empty() {
        out.push_str("  No notes yet.\n");
    } else {
        for line in format_note_lines(notes) {
            let _ = writeln!(out, "{line}");
        }
    }
    out
}

pub fn render_error_banner(message: Option<&str>) -> String {
    message.map_or_else(String::new, |message| format!("! {message}\n"))
}

pub fn render<B: NotesBackend, S: CredentialStore>(
    controller: &ViewController<B, S>,
    now: Instant,
) -> String {
    render_screen(controller, controller.form(), now)
}

/// Like [`render`] but with a form draft that has local, unsubmitted edits.
pub fn render_screen<B: NotesBackend, S: CredentialStore>(
    controller: &ViewController<B, S>,
    form: &NoteDraft,
    now: Instant,
) -> String {
    let mut out = render_error_banner(controller.visible_error(now));
    let body = match controller.view() {
        View::Login => render_login(controller.has_quick_login()),
        View::Register => render_register(),
        View::List(filter) => render_note_list(filter, controller.notes()),
        view @ (View::CreateForm | View::EditForm(_)) => {
            render_note_form(view, form, controller.categories())
        }
    };
    out.push_str(&body);
    if controller.is_loading() {
        out.push_str("  loading...\n");
    }
    out
}

fn placeholder(value: &str) -> &str {
    if value.is_empty() {
        "(empty)"
    } else {
        value
    }
}
