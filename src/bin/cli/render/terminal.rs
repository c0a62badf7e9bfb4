use flashdeck_lib::{Flashcard, Mirror};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const GRAY: &str = "\x1b[90m";
}

const BRANCH: &str = "\u{251c}\u{2500}\u{2500} ";
const LAST_BRANCH: &str = "\u{2514}\u{2500}\u{2500} ";

/// Wrap `text` in an ANSI style when color is enabled
pub fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render subjects and their questions as a two-level tree
pub fn render_tree(mirror: &Mirror, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for (subject, cards) in mirror.iter() {
        lines.push(paint(subject, Color::BOLD, use_color));

        for (i, card) in cards.iter().enumerate() {
            let connector = if i + 1 == cards.len() { LAST_BRANCH } else { BRANCH };
            let id = paint(&format!("[{}]", card.id), Color::GRAY, use_color);
            lines.push(format!("{}{} {}", connector, id, card.question));
        }
    }

    lines
}

/// Render one card's question and answer, wrapped to `width` columns
pub fn render_card(subject: &str, card: &Flashcard, width: usize, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(paint(&format!("{} #{}", subject, card.id), Color::DIM, use_color));
    lines.push(String::new());
    lines.push(paint("Question", Color::BOLD, use_color));
    lines.extend(wrap_lines(&card.question, "  ", width));
    lines.push(String::new());
    lines.push(paint("Answer", Color::BOLD, use_color));
    lines.extend(wrap_lines(&card.answer, "  ", width));
    lines
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
        } else {
            let mut current_line = String::new();
            for word in line.split_whitespace() {
                if current_line.is_empty() {
                    current_line = word.to_string();
                } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                    current_line.push(' ');
                    current_line.push_str(word);
                } else {
                    lines.push(format!("{}{}", prefix, current_line));
                    current_line = word.to_string();
                }
            }
            if !current_line.is_empty() {
                lines.push(format!("{}{}", prefix, current_line));
            }
        }
    }

    if lines.is_empty() && !text.is_empty() {
        lines.push(format!("{}{}", prefix, text));
    }

    lines
}
