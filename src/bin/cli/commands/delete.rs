use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, id: i64, format: &OutputFormat) -> Result<()> {
    let removal = app.session.delete_flashcard(id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": id,
                "deleted": removal.is_some(),
                "subject": removal.as_ref().map(|r| r.subject.as_str()),
                "subjectRemoved": removal.as_ref().map_or(false, |r| r.subject_removed),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let Some(removal) = removal else {
                println!("No flashcard with id {}; nothing deleted.", id);
                return Ok(());
            };
            println!("Deleted flashcard {}", removal.card_id);
            if removal.subject_removed {
                println!("  Subject \"{}\" had no cards left and was removed", removal.subject);
            }
        }
    }

    Ok(())
}
