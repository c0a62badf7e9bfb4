mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flashdeck_lib::AppConfig;

#[derive(Parser)]
#[command(name = "flashdeck", about = "Flashcards for study, organized by subject", version)]
struct Cli {
    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file (default: <config dir>/flashdeck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List subjects and their questions
    List,

    /// Add a flashcard (the subject is created if new)
    Add {
        /// Subject name
        subject: String,
        /// Question text
        question: String,
        /// Answer text
        answer: String,
    },

    /// Delete a flashcard by id
    Delete {
        /// Flashcard id as shown by `list`
        id: i64,
    },

    /// Show a flashcard's question and answer
    Show {
        /// Flashcard id
        id: i64,
    },

    /// Review random cards from a subject, answering on stdin
    Review {
        /// Subject name
        subject: String,
        /// Number of cards to ask (default from config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        rounds: Option<u64>,
    },

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let use_color = !cli.no_color && atty_check();
    let mut app = app::App::new(config, cli.db)?;

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(app)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::List) => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Add { subject, question, answer }) => {
            commands::add::run(&mut app, &subject, &question, &answer, &cli.format, use_color)?;
        }
        Some(Command::Delete { id }) => {
            commands::delete::run(&mut app, id, &cli.format)?;
        }
        Some(Command::Show { id }) => {
            commands::show::run(&app, id, &cli.format, use_color)?;
        }
        Some(Command::Review { subject, rounds }) => {
            let rounds = rounds.map_or(app.config.review_rounds, |r| r as usize);
            commands::review::run(&mut app, &subject, rounds, &cli.format, use_color)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(app)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_rounds_must_be_positive() {
        assert!(Cli::try_parse_from(["flashdeck", "review", "Geo", "--rounds", "0"]).is_err());

        let cli = Cli::try_parse_from(["flashdeck", "review", "Geo", "--rounds", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Review { ref subject, rounds: Some(3) }) if subject == "Geo"
        ));
    }
}
