use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    subject: &str,
    question: &str,
    answer: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let card = app.session.add_flashcard(subject, question, answer)?;
    let subject = subject.trim();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "subject": subject,
                "flashcard": card,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Added flashcard {} to {}",
                terminal::paint(&card.id.to_string(), Color::BOLD, use_color),
                subject
            );
            println!("  Q: {}", card.question);
            println!("  A: {}", card.answer);
        }
    }

    Ok(())
}
