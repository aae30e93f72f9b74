//! Review-grading engine shared by the learning applications.
//!
//! Provides:
//! - Fuzzy answer comparison with a tunable edit-distance tolerance
//! - Spaced repetition algorithm implementations (SM-2, FSRS) and the
//!   four-grade dispatch table
//! - Corrective-drill sequencing and per-step scoring
//! - Framed event stream reader for incremental grading feedback
//!
//! Host concerns (persistence, UI, audio, transport) stay outside; all
//! inputs are treated as immutable and new values are produced rather
//! than mutated. Concurrent transitions on the same card must be
//! serialized by the caller.

pub mod algorithm;
pub mod drill;
pub mod error;
pub mod matching;
pub mod stream;
pub mod types;

pub use algorithm::dispatch::GradeActions;
pub use algorithm::{get_algorithm, SchedulingResult, SpacedRepetitionAlgorithm};
pub use drill::{
    auto_speech_for_step, build_steps, expected_for_step, is_match_for_step, score_step,
    AutoSpeech, DrillLesson, DrillStep, DrillStepOutcome,
};
pub use error::{Result, StreamError};
pub use matching::{compare, levenshtein_distance, normalize, remove_parens};
pub use stream::{EventStreamReader, StreamEvent};
pub use types::{Algorithm, Grade, MemoryState, MIN_EASE};
