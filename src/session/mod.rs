//! Study sessions.
//!
//! A pass presents every due card, retries misses until they are answered
//! correctly, and saves each outcome as it happens.

mod prompts;
mod review;

pub use prompts::StudyPrompt;
pub use review::{grade_answer, Progress, ReviewSession, SessionSummary, StepOutcome};
