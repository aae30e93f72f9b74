//! Core types for the review-grading engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest value the ease factor may take.
pub const MIN_EASE: f64 = 1.3;

/// Learner performance grade for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }

    /// Map a binary correct/incorrect verdict to a grade.
    /// Wrong -> Again, correct -> Good
    pub fn from_correct(correct: bool) -> Self {
        if correct { Self::Good } else { Self::Again }
    }
}

/// Per-card memory-strength state.
///
/// Created on the first review of a card, superseded (never mutated) by
/// each scheduling transition. `ease` never falls below [`MIN_EASE`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryState {
    pub repetitions: u32,
    pub interval_days: u32,
    pub ease: f64,
    pub lapses: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            repetitions: 0,
            interval_days: 1,
            ease: 2.5,
            lapses: 0,
            stability: None,
            difficulty: None,
            due_date: None,
        }
    }
}

/// Scheduling algorithm options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Sm2,
    Fsrs,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Sm2
    }
}

impl Algorithm {
    /// Get the algorithm name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm2 => "sm2",
            Self::Fsrs => "fsrs",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sm2" => Some(Self::Sm2),
            "fsrs" => Some(Self::Fsrs),
            _ => None,
        }
    }
}
