use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let mirror = app.session.mirror();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = mirror.iter().map(|(subject, cards)| {
                serde_json::json!({
                    "subject": subject,
                    "flashcards": cards,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if mirror.is_empty() {
                println!("No flashcards yet. Add one with `flashdeck add <subject> <question> <answer>`.");
                return Ok(());
            }

            for line in terminal::render_tree(mirror, use_color) {
                println!("{}", line);
            }

            println!(
                "\n{} flashcards in {} subjects",
                mirror.card_count(),
                mirror.subject_count()
            );
        }
    }

    Ok(())
}
