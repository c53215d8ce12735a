//! Spaced-repetition scheduling.
//!
//! A fixed, deterministic formula: no difficulty estimation, no adaptive
//! ease. See [`compute_next_state`].

mod engine;

pub use engine::{compute_next_state, interval_days, Outcome, ScheduleUpdate};
