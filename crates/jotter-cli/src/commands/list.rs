use jotter_core::{Intent, NoteFilter, View};

use crate::commands::common::{note_to_list_item, run_intent, signed_in_controller, NoteListItem};
use crate::error::CliError;
use crate::views::render_note_list;

pub async fn run_list(
    filter: NoteFilter,
    as_json: bool,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let mut controller = signed_in_controller(global_profile).await?;
    if filter != NoteFilter::All {
        run_intent(&mut controller, Intent::SelectView(View::List(filter))).await?;
    }

    if as_json {
        let json_items = controller
            .notes()
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        print!("{}", render_note_list(filter, controller.notes()));
    }

    Ok(())
}

pub async fn run_categories(as_json: bool, global_profile: Option<&str>) -> Result<(), CliError> {
    let controller = signed_in_controller(global_profile).await?;
    let categories = controller.categories();

    if as_json {
        println!("{}", serde_json::to_string_pretty(categories)?);
    } else if categories.is_empty() {
        println!("No categories yet.");
    } else {
        for category in categories {
            println!("{:>5}  {}", category.id.to_string(), category.name);
        }
    }

    Ok(())
}
