use jotter_core::{Intent, NoteDraft};

use crate::commands::common::{resolve_note_content, run_intent, signed_in_controller};
use crate::error::CliError;

pub async fn run_add(
    title: &str,
    categories: &[String],
    content_parts: &[String],
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;
    let draft = NoteDraft::new(title, content, categories.iter().cloned()).validated()?;

    let mut controller = signed_in_controller(global_profile).await?;
    run_intent(&mut controller, Intent::SubmitCreate(draft.clone())).await?;

    match controller.last_saved() {
        Some(note) => println!("{}", note.id),
        None => println!("Created note '{}'", draft.title),
    }
    Ok(())
}
