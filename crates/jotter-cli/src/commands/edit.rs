use jotter_core::{Intent, NoteDraft};

use crate::commands::common::{
    capture_editor_input_with_initial, parse_note_id, run_intent, signed_in_controller,
};
use crate::error::CliError;

#[derive(Debug, Default)]
pub struct EditChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub categories: Vec<String>,
    pub clear_categories: bool,
}

impl EditChanges {
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.categories.is_empty()
            && !self.clear_categories
    }

    /// Apply the requested field changes on top of a prefilled draft.
    pub fn apply(self, mut draft: NoteDraft) -> NoteDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(content) = self.content {
            draft.content = content;
        }
        if self.clear_categories {
            draft.category_names.clear();
        } else if !self.categories.is_empty() {
            draft.category_names = self.categories;
        }
        draft
    }
}

pub async fn run_edit(
    id: &str,
    changes: EditChanges,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let mut controller = signed_in_controller(global_profile).await?;
    run_intent(&mut controller, Intent::EditNote(note_id)).await?;

    let original = controller.form().clone();
    let draft = if changes.is_empty() {
        let Some(content) = capture_editor_input_with_initial(&original.content)? else {
            return Err(CliError::EmptyContent);
        };
        NoteDraft {
            content,
            ..original.clone()
        }
    } else {
        changes.apply(original.clone())
    };

    if draft == original {
        println!("{note_id}");
        return Ok(());
    }

    run_intent(&mut controller, Intent::SubmitEdit(note_id, draft)).await?;
    println!("{note_id}");
    Ok(())
}
