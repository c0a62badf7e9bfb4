use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, id: i64, format: &OutputFormat, use_color: bool) -> Result<()> {
    let Some((subject, card)) = app.session.find_card(id) else {
        bail!("No flashcard with id {}", id);
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "subject": subject,
                "flashcard": card,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for line in terminal::render_card(subject, card, 80, use_color) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
