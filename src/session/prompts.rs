//! Interactive prompts for a study pass.
//!
//! Reads answers line by line and writes colored feedback. The reader and
//! writer are generic so the prompts can run against stdin/stdout or an
//! in-memory buffer.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use super::review::{Progress, StepOutcome};
use crate::cards::Flashcard;
use crate::scheduling::Outcome;

/// Terminal prompts for the study command.
pub struct StudyPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StudyPrompt<R, W> {
    /// Create prompts over a reader and writer, such as stdin and stdout.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Announce how many cards are due.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn announce(&mut self, due: usize) -> io::Result<()> {
        let noun = if due == 1 { "flashcard" } else { "flashcards" };
        writeln!(
            self.output,
            "There {} {} due {noun} available for study.",
            if due == 1 { "is" } else { "are" },
            due.to_string().bold()
        )
    }

    /// Ask a yes/no question. Anything other than `y`/`yes` is a no,
    /// including end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} [y/N]: ")?;
        self.output.flush()?;

        Ok(self
            .read_line()?
            .is_some_and(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")))
    }

    /// Show the next question and read the user's answer.
    ///
    /// Returns `None` when input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask(&mut self, progress: Progress, card: &Flashcard) -> io::Result<Option<String>> {
        writeln!(
            self.output,
            "{} {}",
            format!("Question {}/{}:", progress.position, progress.total).cyan().bold(),
            card.question
        )?;
        write!(self.output, "Your answer: ")?;
        self.output.flush()?;

        self.read_line()
    }

    /// Tell the user how their answer was graded.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn feedback(&mut self, step: &StepOutcome, reveal_answer: bool) -> io::Result<()> {
        match step.outcome {
            Outcome::Correct => writeln!(
                self.output,
                "{} {}",
                "Correct!".green().bold(),
                format!("Next review on {}.", step.update.deadline).dimmed()
            ),
            Outcome::Incorrect if reveal_answer => writeln!(
                self.output,
                "{} The correct answer is: {}",
                "Incorrect.".red().bold(),
                step.card.answer.bold()
            ),
            Outcome::Incorrect => writeln!(self.output, "{}", "Incorrect.".red().bold()),
        }
    }

    /// Report a failed save for the current card.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn save_failed(&mut self, message: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "{} {message}",
            "Could not save this answer:".yellow()
        )
    }

    /// Report that the current card was deleted from the deck mid-pass.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn card_gone(&mut self, card: &Flashcard) -> io::Result<()> {
        writeln!(
            self.output,
            "{} Flashcard with ID: {} no longer exists, skipping it.",
            "Warning:".yellow(),
            card.id
        )
    }

    /// Print a line of plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Read one line. Invalid UTF-8 is replaced rather than rejected.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Consume the prompt and return the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}
