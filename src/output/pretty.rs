use std::fmt::Write;

use chrono::NaiveDate;
use colored::Colorize;

use crate::cards::Flashcard;
use crate::session::SessionSummary;

const HEADERS: [&str; 5] = ["ID", "Question", "Answer", "Deadline", "Growth"];

/// Format a list of cards as a table
pub fn format_cards_pretty(cards: &[Flashcard], title: &str, today: NaiveDate) -> String {
    if cards.is_empty() {
        return format!("{title} (0 cards)\n  No flashcards found.");
    }

    let rows: Vec<[String; 5]> = cards
        .iter()
        .map(|card| {
            [
                card.id.to_string(),
                card.question.clone(),
                card.answer.clone(),
                card.deadline.to_string(),
                card.growth_factor.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = format!("{title} ({} cards)\n", cards.len());

    let header = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, w))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(output, "{}", header.cyan().bold());
    let _ = writeln!(output, "{}", "─".repeat(widths.iter().sum::<usize>() + 8).dimmed());

    for (card, row) in cards.iter().zip(&rows) {
        let cells: Vec<String> = row.iter().zip(widths).map(|(c, w)| pad(c, w)).collect();
        let deadline = if card.is_due(today) {
            cells[3].yellow().to_string()
        } else {
            cells[3].clone()
        };
        let _ = writeln!(
            output,
            "{}  {}  {}  {}  {}",
            cells[0].dimmed(),
            cells[1].bold(),
            cells[2],
            deadline,
            cells[4]
        );
    }

    output
}

/// Format the confirmation printed after `add`
pub fn format_card_added(card: &Flashcard) -> String {
    format!(
        "{} ID: {}, Question: {}, Answer: {}, Deadline: {}.",
        "Flashcard added with".green(),
        card.id,
        card.question,
        card.answer,
        card.deadline
    )
}

/// Format the end-of-pass summary
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let mut output = String::new();
    let heading = if summary.is_complete() {
        "Study session completed.".green().bold()
    } else {
        "Study session interrupted.".yellow().bold()
    };
    let _ = writeln!(output, "{heading}");
    let _ = writeln!(output, "{}", "─".repeat(40).dimmed());
    let _ = writeln!(
        output,
        "  {} {}/{}",
        "Correct:".bold(),
        summary.correct_count,
        summary.attempts_total
    );
    let _ = writeln!(output, "  {} {}", "Answers:".bold(), summary.presentations);
    let _ = writeln!(output, "  {} {}", "Misses:".bold(), summary.misses);
    if summary.remaining > 0 {
        let _ = writeln!(output, "  {} {}", "Remaining:".bold(), summary.remaining);
    }
    if summary.skipped > 0 {
        let _ = writeln!(output, "  {} {}", "Skipped:".bold(), summary.skipped);
    }
    let _ = write!(output, "  {} {}", "Duration:".bold(), summary.format_duration());
    output
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{s}{}", " ".repeat(width.saturating_sub(len)))
}
