//! Legacy ease-based spaced repetition (SM-2 family).
//!
//! Grades run 0-4; a grade of 3 or better counts as a successful recall.
//! The ease polynomial is the classic SM-2 update with a hard floor.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{Grade, MemoryState, MIN_EASE};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub graduating_interval: u32,
    pub second_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: MIN_EASE,
            graduating_interval: 1,
            second_interval: 6,
        }
    }
}

impl Sm2 {
    /// Apply one review grade (0-4) to a memory state.
    ///
    /// Grades below 3 reset the repetition streak and count a lapse;
    /// every grade, low or high, feeds the same ease update, so repeated
    /// failures drive ease toward the floor.
    pub fn grade_performance(&self, state: &MemoryState, grade: u8) -> MemoryState {
        let ease = self.next_ease(state.ease, grade);

        if grade >= 3 {
            let repetitions = state.repetitions + 1;
            let interval_days = match repetitions {
                1 => self.graduating_interval,
                2 => self.second_interval,
                _ => ((state.interval_days as f64 * state.ease).ceil() as u32).max(1),
            };
            MemoryState {
                repetitions,
                interval_days,
                ease,
                lapses: state.lapses,
                stability: None,
                difficulty: None,
                due_date: state.due_date,
            }
        } else {
            MemoryState {
                repetitions: 0,
                interval_days: 1,
                ease,
                lapses: state.lapses + 1,
                stability: None,
                difficulty: None,
                due_date: state.due_date,
            }
        }
    }

    /// ease' = ease - 0.8 + 0.28g - 0.02g^2, floored at minimum ease.
    fn next_ease(&self, ease: f64, grade: u8) -> f64 {
        let g = grade as f64;
        (ease - 0.8 + 0.28 * g - 0.02 * g * g).max(self.minimum_ease)
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> MemoryState {
        MemoryState {
            ease: self.initial_ease,
            ..MemoryState::default()
        }
    }

    fn schedule(&self, state: &MemoryState, grade: Grade, now: DateTime<Utc>) -> SchedulingResult {
        let mut new_state = self.grade_performance(state, grade.to_value());
        let next_due = now + Duration::days(new_state.interval_days as i64);
        new_state.due_date = Some(next_due);

        SchedulingResult { new_state, next_due }
    }
}
