use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Ask `rounds` random cards from `subject`, reading one answer per line from stdin.
///
/// Stops early at end of input.
pub fn run(
    app: &mut App,
    subject: &str,
    rounds: usize,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    if rounds == 0 {
        bail!("Number of rounds must be at least 1");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut results = Vec::new();

    for round in 1..=rounds {
        let card = app.session.draw_card(subject)?;

        if matches!(format, OutputFormat::Plain) {
            println!("{}", terminal::paint(&format!("Question {}:", round), Color::BOLD, use_color));
            println!("  {}", card.question);
            print!("Your answer: ");
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let outcome = app.session.submit_answer(&card, &line);

        match format {
            OutputFormat::Json => {
                results.push(serde_json::json!({
                    "id": card.id,
                    "question": card.question,
                    "submitted": line.trim(),
                    "correct": outcome.correct,
                    "expected": outcome.expected,
                }));
            }
            OutputFormat::Plain => {
                if outcome.correct {
                    println!("{}", terminal::paint("Correct!", Color::GREEN, use_color));
                } else {
                    println!(
                        "{} The answer is: {}",
                        terminal::paint("Incorrect.", Color::RED, use_color),
                        outcome.expected
                    );
                }
                println!("{}\n", outcome.scoreboard);
            }
        }
    }

    if let OutputFormat::Json = format {
        let scoreboard = app.session.scoreboard();
        let output = serde_json::json!({
            "subject": subject,
            "results": results,
            "score": scoreboard.score,
            "total": scoreboard.total,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
