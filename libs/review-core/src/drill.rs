//! Corrective-drill sequencing and per-step scoring.
//!
//! A drill walks the learner through a generated lesson: hear the
//! corrected sentence, repeat the grammar point it targets, optionally
//! repeat a contrasting point, then produce a fresh sentence unaided.
//! The lesson itself comes from an external generator and is consumed
//! read-only; this module derives the step order and grades each step.

use crate::matching::compare;
use serde::{Deserialize, Serialize};

/// Edit-distance budget for the guided-repetition (target) step.
///
/// The target step echoes a sentence the learner just heard, so it is
/// graded more leniently than free production.
pub const TARGET_TOLERANCE: usize = 3;

/// What went wrong in the learner's original sentence, and the fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub original: String,
    pub corrected: String,
    pub error_explanation: String,
}

/// A target-language sentence with its English gloss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    pub en: String,
}

/// A grammar point the drill exercises, with one example sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarPoint {
    pub label: String,
    pub example: Example,
}

/// Free-production prompt closing out the drill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Production {
    pub prompt_en: String,
    pub answer: String,
}

/// A generated corrective lesson, immutable for the drill's lifetime.
///
/// `contrast` is present iff the generator found a meaningful
/// grammatical contrast to drill against; its absence is expected, not
/// an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillLesson {
    pub diagnosis: Diagnosis,
    pub target: GrammarPoint,
    #[serde(default)]
    pub contrast: Option<GrammarPoint>,
    pub production: Production,
}

/// One step of a drill, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillStep {
    Diagnosis,
    Target,
    Contrast,
    Production,
}

impl DrillStep {
    /// Stable short key used for UI and analytics correlation.
    pub fn key(self) -> &'static str {
        match self {
            Self::Diagnosis => "diagnosis",
            Self::Target => "A",
            Self::Contrast => "B",
            Self::Production => "P",
        }
    }
}

/// Content to auto-play when a step is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSpeech {
    /// Target-language text to speak.
    pub tl: String,
    /// English gloss to speak afterwards, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

/// Verdict for one completed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillStepOutcome {
    pub expected: String,
    pub transcription: String,
    pub is_match: bool,
}

/// Derive the ordered step sequence for a lesson.
///
/// Always `[Diagnosis, Target, .., Production]`, with `Contrast`
/// included only when the lesson carries one.
pub fn build_steps(lesson: &DrillLesson) -> Vec<DrillStep> {
    let mut steps = vec![DrillStep::Diagnosis, DrillStep::Target];
    if lesson.contrast.is_some() {
        steps.push(DrillStep::Contrast);
    }
    steps.push(DrillStep::Production);
    steps
}

/// The text the learner is expected to say at a step.
///
/// Empty for `Contrast` when the lesson has no contrast point.
pub fn expected_for_step(lesson: &DrillLesson, step: DrillStep) -> &str {
    match step {
        DrillStep::Diagnosis => &lesson.diagnosis.corrected,
        DrillStep::Target => &lesson.target.example.text,
        DrillStep::Contrast => lesson
            .contrast
            .as_ref()
            .map(|c| c.example.text.as_str())
            .unwrap_or(""),
        DrillStep::Production => &lesson.production.answer,
    }
}

/// Auto-playback content for a step.
///
/// `None` for `Production` (the learner must produce unaided) and for
/// `Contrast` when the lesson has none.
pub fn auto_speech_for_step(lesson: &DrillLesson, step: DrillStep) -> Option<AutoSpeech> {
    match step {
        DrillStep::Diagnosis => Some(AutoSpeech {
            tl: lesson.diagnosis.corrected.clone(),
            en: None,
        }),
        DrillStep::Target => Some(AutoSpeech {
            tl: lesson.target.example.text.clone(),
            en: Some(lesson.target.example.en.clone()),
        }),
        DrillStep::Contrast => lesson.contrast.as_ref().map(|c| AutoSpeech {
            tl: c.example.text.clone(),
            en: Some(c.example.en.clone()),
        }),
        DrillStep::Production => None,
    }
}

/// Decide whether a transcription passes a step.
///
/// An externally supplied `verdict` (e.g. from the host's own grader)
/// is authoritative; without one the comparator runs strict. The
/// `Target` step additionally passes on a lenient comparison, so a
/// near-miss repetition is accepted even when the external verdict says
/// no. All other steps stay strict.
pub fn is_match_for_step(
    step: DrillStep,
    expected: &str,
    transcription: &str,
    verdict: Option<bool>,
) -> bool {
    let base = verdict.unwrap_or_else(|| compare(expected, transcription, 0));
    match step {
        DrillStep::Target => compare(expected, transcription, TARGET_TOLERANCE) || base,
        _ => base,
    }
}

/// Score one step of a lesson into a [`DrillStepOutcome`].
pub fn score_step(
    lesson: &DrillLesson,
    step: DrillStep,
    transcription: &str,
    verdict: Option<bool>,
) -> DrillStepOutcome {
    let expected = expected_for_step(lesson, step);
    DrillStepOutcome {
        expected: expected.to_string(),
        transcription: transcription.to_string(),
        is_match: is_match_for_step(step, expected, transcription, verdict),
    }
}
