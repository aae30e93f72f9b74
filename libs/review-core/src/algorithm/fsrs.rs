//! FSRS (Free Spaced Repetition Scheduler), the four-grade path.
//!
//! DSR model: Difficulty (1-10), Stability (days until retention drops
//! to target), Retrievability (recall probability). Deterministic for a
//! given state, grade, and clock reading.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{Grade, MemoryState};
use chrono::{DateTime, Duration, Utc};

/// FSRS algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Fsrs {
    pub request_retention: f64,
    pub maximum_interval: f64,
    /// FSRS-4.5 parameters (17 weights).
    pub w: [f64; 17],
}

impl Default for Fsrs {
    fn default() -> Self {
        Self {
            request_retention: 0.9,
            maximum_interval: 36500.0,
            w: [
                0.4, 0.6, 2.4, 5.8, // w[0-3]: initial stability per grade
                4.93, // w[4]: initial difficulty base
                0.94, // w[5]: initial difficulty modifier
                0.86, // w[6]: difficulty decay
                0.01, // w[7]: mean reversion weight
                1.49, // w[8]: stability exp base
                0.14, // w[9]: stability decay
                0.94, // w[10]: retrievability effect
                2.18, // w[11]: forget stability base
                0.05, // w[12]: difficulty on forget
                0.34, // w[13]: stability on forget
                1.26, // w[14]: retrievability on forget
                0.29, // w[15]: hard penalty
                2.61, // w[16]: easy bonus
            ],
        }
    }
}

impl SpacedRepetitionAlgorithm for Fsrs {
    fn name(&self) -> &'static str {
        "fsrs"
    }

    fn initial_state(&self) -> MemoryState {
        MemoryState::default()
    }

    fn schedule(&self, state: &MemoryState, grade: Grade, now: DateTime<Utc>) -> SchedulingResult {
        let first_review =
            state.repetitions == 0 || state.stability.is_none() || state.difficulty.is_none();

        let (stability, difficulty, lapses) = if first_review {
            (
                self.initial_stability(grade),
                self.initial_difficulty(grade),
                state.lapses + u32::from(grade == Grade::Again),
            )
        } else {
            self.review(state, grade, now)
        };

        let interval_days = if grade == Grade::Again {
            1
        } else {
            self.interval_from_stability(stability)
        };
        let next_due = now + Duration::days(interval_days as i64);

        SchedulingResult {
            new_state: MemoryState {
                repetitions: state.repetitions + 1,
                interval_days,
                ease: state.ease,
                lapses,
                stability: Some(stability),
                difficulty: Some(difficulty),
                due_date: Some(next_due),
            },
            next_due,
        }
    }
}

impl Fsrs {
    /// S0(G) = w[G-1]
    fn initial_stability(&self, grade: Grade) -> f64 {
        self.w[(grade.to_value() - 1) as usize].max(0.1)
    }

    /// D0(G) = w[4] - w[5] * (G - 3), clamped to [1, 10].
    fn initial_difficulty(&self, grade: Grade) -> f64 {
        let d0 = self.w[4] - self.w[5] * (grade.to_value() as f64 - 3.0);
        d0.clamp(1.0, 10.0)
    }

    /// Mean reversion toward D0, then decay by grade distance from Good.
    fn next_difficulty(&self, current: f64, grade: Grade) -> f64 {
        let d0 = self.initial_difficulty(grade);
        let reverted = self.w[7] * d0 + (1.0 - self.w[7]) * current;
        (reverted - self.w[6] * (grade.to_value() as f64 - 3.0)).clamp(1.0, 10.0)
    }

    /// R = (1 + t / (9 * S))^(-1)
    fn retrievability(&self, elapsed_days: f64, stability: f64) -> f64 {
        if stability <= 0.0 {
            return 0.0;
        }
        (1.0 + elapsed_days / (9.0 * stability)).powf(-1.0)
    }

    fn next_stability_recall(&self, s: f64, d: f64, r: f64, grade: Grade) -> f64 {
        let growth = self.w[8].exp()
            * (11.0 - d).max(0.1)
            * s.powf(-self.w[9])
            * ((self.w[10] * (1.0 - r)).exp() - 1.0)
            + 1.0;
        let modifier = match grade {
            Grade::Hard => self.w[15],
            Grade::Easy => self.w[16],
            Grade::Again | Grade::Good => 1.0,
        };
        (s * growth * modifier).clamp(0.1, self.maximum_interval)
    }

    fn next_stability_forget(&self, s: f64, d: f64, r: f64) -> f64 {
        let new_s = self.w[11]
            * d.max(1.0).powf(-self.w[12])
            * ((s + 1.0).powf(self.w[13]) - 1.0)
            * (self.w[14] * (1.0 - r)).exp();
        // A lapse never leaves the card stronger than before.
        new_s.max(0.1).min(s)
    }

    /// I = 9 * S * (1/R - 1) with R = request_retention, in whole days.
    fn interval_from_stability(&self, stability: f64) -> u32 {
        let raw = if self.request_retention <= 0.0 || self.request_retention >= 1.0 {
            stability
        } else {
            9.0 * stability * (1.0 / self.request_retention - 1.0)
        };
        raw.clamp(1.0, self.maximum_interval).round() as u32
    }

    /// Days since the last review, reconstructed from the due date.
    fn elapsed_days(state: &MemoryState, now: DateTime<Utc>) -> f64 {
        match state.due_date {
            Some(due) => {
                let last_review = due - Duration::days(state.interval_days as i64);
                let elapsed = now.signed_duration_since(last_review);
                (elapsed.num_seconds() as f64 / 86400.0).max(0.0)
            }
            None => state.interval_days as f64,
        }
    }

    fn review(&self, state: &MemoryState, grade: Grade, now: DateTime<Utc>) -> (f64, f64, u32) {
        let s = state.stability.unwrap_or(1.0);
        let d = state.difficulty.unwrap_or(5.0);
        let r = self.retrievability(Self::elapsed_days(state, now), s);

        let new_d = self.next_difficulty(d, grade);
        if grade == Grade::Again {
            (self.next_stability_forget(s, d, r), new_d, state.lapses + 1)
        } else {
            (
                self.next_stability_recall(s, d, r, grade),
                new_d,
                state.lapses,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewed_state(now: DateTime<Utc>, stability: f64, difficulty: f64) -> MemoryState {
        MemoryState {
            repetitions: 5,
            interval_days: stability.round() as u32,
            stability: Some(stability),
            difficulty: Some(difficulty),
            due_date: Some(now),
            ..MemoryState::default()
        }
    }

    #[test]
    fn first_review_initializes_dsr_state() {
        let fsrs = Fsrs::default();
        let result = fsrs.schedule(&fsrs.initial_state(), Grade::Good, Utc::now());
        assert!(result.new_state.stability.unwrap() > 0.0);
        assert!(result.new_state.difficulty.is_some());
        assert_eq!(result.new_state.repetitions, 1);
    }

    #[test]
    fn initial_stability_rises_with_grade() {
        let fsrs = Fsrs::default();
        let s: Vec<f64> = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy]
            .into_iter()
            .map(|g| fsrs.initial_stability(g))
            .collect();
        assert!(s[0] < s[1] && s[1] < s[2] && s[2] < s[3]);
    }

    #[test]
    fn initial_difficulty_falls_with_grade() {
        let fsrs = Fsrs::default();
        let d: Vec<f64> = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy]
            .into_iter()
            .map(|g| fsrs.initial_difficulty(g))
            .collect();
        assert!(d[0] > d[1] && d[1] > d[2] && d[2] > d[3]);
    }

    #[test]
    fn stability_grows_on_recall_and_shrinks_on_lapse() {
        let fsrs = Fsrs::default();
        let now = Utc::now();
        let state = reviewed_state(now, 10.0, 5.0);

        let good = fsrs.schedule(&state, Grade::Good, now);
        assert!(good.new_state.stability.unwrap() > 10.0);
        assert_eq!(good.new_state.lapses, 0);

        let again = fsrs.schedule(&state, Grade::Again, now);
        assert!(again.new_state.stability.unwrap() < 10.0);
        assert_eq!(again.new_state.lapses, 1);
        assert_eq!(again.new_state.interval_days, 1);
    }

    #[test]
    fn hard_penalty_and_easy_bonus_bracket_good() {
        let fsrs = Fsrs::default();
        let now = Utc::now();
        let state = reviewed_state(now, 10.0, 5.0);

        let hard = fsrs.schedule(&state, Grade::Hard, now).new_state;
        let good = fsrs.schedule(&state, Grade::Good, now).new_state;
        let easy = fsrs.schedule(&state, Grade::Easy, now).new_state;

        assert!(hard.stability.unwrap() < good.stability.unwrap());
        assert!(good.stability.unwrap() < easy.stability.unwrap());
    }

    #[test]
    fn difficulty_stays_clamped() {
        let fsrs = Fsrs::default();
        let now = Utc::now();

        let hardest = reviewed_state(now, 5.0, 10.0);
        let d = fsrs.schedule(&hardest, Grade::Again, now).new_state;
        assert!(d.difficulty.unwrap() <= 10.0);

        let easiest = reviewed_state(now, 5.0, 1.0);
        let d = fsrs.schedule(&easiest, Grade::Easy, now).new_state;
        assert!(d.difficulty.unwrap() >= 1.0);
    }

    #[test]
    fn interval_respects_maximum() {
        let fsrs = Fsrs::default();
        let now = Utc::now();
        let state = reviewed_state(now, 50000.0, 5.0);
        let result = fsrs.schedule(&state, Grade::Good, now);
        assert!(result.new_state.interval_days as f64 <= fsrs.maximum_interval);
    }

    #[test]
    fn retrievability_formula() {
        let fsrs = Fsrs::default();
        // At t=0, R is 1; at t = 9*S, R is 0.5.
        assert!((fsrs.retrievability(0.0, 10.0) - 1.0).abs() < 0.001);
        assert!((fsrs.retrievability(90.0, 10.0) - 0.5).abs() < 0.001);
    }

    #[test]
    fn scheduling_is_deterministic() {
        let fsrs = Fsrs::default();
        let now = Utc::now();
        let state = reviewed_state(now, 10.0, 5.0);
        let a = fsrs.schedule(&state, Grade::Good, now);
        let b = fsrs.schedule(&state, Grade::Good, now);
        assert_eq!(a.new_state.stability, b.new_state.stability);
        assert_eq!(a.next_due, b.next_due);
    }
}
