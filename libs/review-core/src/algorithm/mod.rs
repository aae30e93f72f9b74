//! Memory scheduling algorithm implementations.
//!
//! Two families coexist behind one trait: the legacy ease-based path
//! ([`sm2`]) and the four-grade stability/difficulty path ([`fsrs`]).
//! The host picks one via configuration; call sites never branch on the
//! algorithm themselves.

pub mod dispatch;
pub mod fsrs;
pub mod sm2;

use crate::types::{Grade, MemoryState};
use chrono::{DateTime, Utc};

/// Result of scheduling a card after review.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub new_state: MemoryState,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate next memory state after a review.
    fn schedule(&self, state: &MemoryState, grade: Grade, now: DateTime<Utc>) -> SchedulingResult;

    /// Initial state for a card's first review.
    fn initial_state(&self) -> MemoryState;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        "fsrs" => Some(Box::new(fsrs::Fsrs::default())),
        _ => None,
    }
}
