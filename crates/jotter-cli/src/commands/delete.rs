use jotter_core::Intent;

use crate::commands::common::{parse_note_id, run_intent, signed_in_controller};
use crate::error::CliError;

pub async fn run_delete(id: &str, global_profile: Option<&str>) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let mut controller = signed_in_controller(global_profile).await?;
    run_intent(&mut controller, Intent::Delete(note_id)).await?;
    println!("{note_id}");
    Ok(())
}
