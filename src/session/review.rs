//! Review pass over due cards.
//!
//! A [`ReviewSession`] keeps a queue of cards that still need a correct
//! answer. Each step looks at the head of the queue; answering it runs the
//! scheduler, persists the new state through the [`CardStore`], and only
//! then pops the card. Correct cards leave the pass for good; missed cards
//! go to the back of the queue and come around again. There is no give-up
//! limit.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardStore, Flashcard};
use crate::error::CardieeError;
use crate::scheduling::{compute_next_state, Outcome, ScheduleUpdate};

/// Grade a free-text response against the stored answer.
///
/// Both sides are trimmed and compared case-insensitively. No partial
/// credit.
#[must_use]
pub fn grade_answer(expected: &str, given: &str) -> Outcome {
    Outcome::from_match(expected.trim().to_lowercase() == given.trim().to_lowercase())
}

/// Progress shown before each question, e.g. `Question 2/5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Distinct cards answered correctly so far, plus one.
    pub position: usize,
    /// Cards in the pass.
    pub total: usize,
}

/// What happened on one answered step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The card that was answered.
    pub card: Flashcard,
    /// How it was graded.
    pub outcome: Outcome,
    /// The state that was persisted for it.
    pub update: ScheduleUpdate,
    /// Whether the card went back into the queue.
    pub requeued: bool,
}

/// Statistics for a finished (or abandoned) pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Distinct cards answered correctly.
    pub correct_count: usize,
    /// Cards in the pass.
    pub attempts_total: usize,
    /// Total answers given, including retries.
    pub presentations: usize,
    /// Answers graded incorrect.
    pub misses: usize,
    /// Cards still waiting for a correct answer.
    pub remaining: usize,
    /// Cards dropped because they disappeared from the store mid-pass.
    pub skipped: usize,
    /// Wall-clock length of the pass.
    pub duration_seconds: i64,
}

impl SessionSummary {
    /// Format duration as human-readable string.
    #[must_use]
    pub fn format_duration(&self) -> String {
        let minutes = self.duration_seconds / 60;
        let seconds = self.duration_seconds % 60;
        if minutes > 0 {
            format!("{minutes}m {seconds}s")
        } else {
            format!("{seconds}s")
        }
    }

    /// Whether every card in the pass was answered correctly.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// One interactive pass over a fixed set of due cards.
#[derive(Debug)]
pub struct ReviewSession {
    pending: VecDeque<Flashcard>,
    correct_ids: HashSet<CardId>,
    attempts_total: usize,
    correct_count: usize,
    presentations: usize,
    misses: usize,
    skipped: usize,
    started_at: DateTime<Local>,
}

impl ReviewSession {
    /// Start a pass over `cards` in an order chosen by `rng`.
    pub fn new<R: Rng + ?Sized>(mut cards: Vec<Flashcard>, rng: &mut R) -> Self {
        cards.shuffle(rng);
        log::debug!("Starting review pass with {} cards", cards.len());

        Self {
            attempts_total: cards.len(),
            pending: cards.into(),
            correct_ids: HashSet::new(),
            correct_count: 0,
            presentations: 0,
            misses: 0,
            skipped: 0,
            started_at: Local::now(),
        }
    }

    /// The card to present next, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Flashcard> {
        self.pending.front()
    }

    /// Progress counter for the next presentation.
    ///
    /// Counts distinct successes, not presentations, so retries do not push
    /// it past the total.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            position: (self.correct_count + 1).min(self.attempts_total),
            total: self.attempts_total,
        }
    }

    /// Grade `response` against the current card and record the result.
    ///
    /// # Errors
    ///
    /// See [`ReviewSession::answer`].
    pub fn answer_text<S: CardStore + ?Sized>(
        &mut self,
        store: &S,
        response: &str,
        today: NaiveDate,
    ) -> Result<StepOutcome, CardieeError> {
        let outcome = match self.current() {
            Some(card) => grade_answer(&card.answer, response),
            None => return Err(Self::finished_error()),
        };
        self.answer(store, outcome, today)
    }

    /// Record `outcome` for the current card.
    ///
    /// The new schedule is written to `store` before the queue changes. If
    /// the write fails the error is returned and the session is left exactly
    /// as it was, so the same step can be retried.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the pass is already complete or the card's
    /// growth factor is invalid, and whatever the store returns if
    /// persisting fails.
    pub fn answer<S: CardStore + ?Sized>(
        &mut self,
        store: &S,
        outcome: Outcome,
        today: NaiveDate,
    ) -> Result<StepOutcome, CardieeError> {
        let card = self.pending.front().ok_or_else(Self::finished_error)?;
        let update = compute_next_state(card.growth_factor, outcome, today)?;

        if let Err(e) = store.update_state(card.id, update.growth_factor, update.deadline) {
            log::warn!("Could not save review of card {}: {e}", card.id);
            return Err(e);
        }

        let Some(mut card) = self.pending.pop_front() else {
            return Err(Self::finished_error());
        };
        card.growth_factor = update.growth_factor;
        card.deadline = update.deadline;
        self.presentations += 1;

        let requeued = match outcome {
            Outcome::Correct => {
                self.correct_count += 1;
                self.correct_ids.insert(card.id);
                false
            },
            Outcome::Incorrect => {
                self.misses += 1;
                // Only reachable with duplicate IDs in the input.
                if self.correct_ids.contains(&card.id) {
                    false
                } else {
                    self.pending.push_back(card.clone());
                    true
                }
            },
        };

        log::debug!(
            "Card {} answered {outcome}; {} pending",
            card.id,
            self.pending.len()
        );

        Ok(StepOutcome {
            card,
            outcome,
            update,
            requeued,
        })
    }

    /// Drop the current card without grading it.
    ///
    /// Used when the card no longer exists in the store. The card does not
    /// count as correct and is not asked again.
    pub fn skip_current(&mut self) -> Option<Flashcard> {
        let card = self.pending.pop_front()?;
        self.skipped += 1;
        log::debug!("Skipped card {}; {} pending", card.id, self.pending.len());
        Some(card)
    }

    /// Whether every card has been answered correctly or skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cards still waiting for a correct answer.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Distinct cards answered correctly so far.
    #[must_use]
    pub const fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Number of cards the pass started with.
    #[must_use]
    pub const fn attempts_total(&self) -> usize {
        self.attempts_total
    }

    /// Answers recorded so far, including retries.
    #[must_use]
    pub const fn presentations(&self) -> usize {
        self.presentations
    }

    /// Statistics for the pass so far.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct_count: self.correct_count,
            attempts_total: self.attempts_total,
            presentations: self.presentations,
            misses: self.misses,
            remaining: self.pending.len(),
            skipped: self.skipped,
            duration_seconds: (Local::now() - self.started_at).num_seconds(),
        }
    }

    fn finished_error() -> CardieeError {
        CardieeError::InvalidState("review pass has no cards left".to_string())
    }
}
