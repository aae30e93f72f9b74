//! Dispatch table for the four-grade scheduling path.
//!
//! The host supplies one asynchronous action per grade (typically a call
//! into its FSRS-backed persistence layer); [`GradeActions::dispatch`]
//! awaits exactly one of them. The match is exhaustive with no default
//! arm, so adding a grade variant fails to compile until every call site
//! handles it. Errors propagate unmodified; nothing is retried and no
//! state is committed here.

use crate::types::Grade;
use std::future::Future;

/// One no-argument async action per grade.
pub struct GradeActions<FA, FH, FG, FE> {
    pub again: FA,
    pub hard: FH,
    pub good: FG,
    pub easy: FE,
}

impl<FA, FH, FG, FE> GradeActions<FA, FH, FG, FE> {
    /// Invoke the single action matching `grade` and await it.
    pub async fn dispatch<T, E, FutA, FutH, FutG, FutE>(self, grade: Grade) -> Result<T, E>
    where
        FA: FnOnce() -> FutA,
        FH: FnOnce() -> FutH,
        FG: FnOnce() -> FutG,
        FE: FnOnce() -> FutE,
        FutA: Future<Output = Result<T, E>>,
        FutH: Future<Output = Result<T, E>>,
        FutG: Future<Output = Result<T, E>>,
        FutE: Future<Output = Result<T, E>>,
    {
        match grade {
            Grade::Again => (self.again)().await,
            Grade::Hard => (self.hard)().await,
            Grade::Good => (self.good)().await,
            Grade::Easy => (self.easy)().await,
        }
    }
}
