use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Aggregate score computed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// 0 to 100, as reported by the service.
    pub percentage: f64,
    pub correct: u32,
    pub total: u32,
}

impl Score {
    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.total.saturating_sub(self.correct)
    }

    /// Percentage clamped into `0..=100`; guards against sloppy service rounding.
    #[must_use]
    pub fn clamped_percentage(&self) -> f64 {
        if self.percentage.is_nan() {
            return 0.0;
        }
        self.percentage.clamp(0.0, 100.0)
    }
}

/// Per-question verdict from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default)]
    pub user_answer: Option<usize>,
    pub correct_answer: usize,
    pub correct_answer_text: String,
    pub is_correct: bool,
}

/// Everything the results screen shows, read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub score: Score,
    #[serde(rename = "results", default)]
    pub per_question: Vec<QuestionResult>,
}

impl ResultSet {
    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.per_question
            .iter()
            .filter(|r| r.user_answer.is_none())
            .count()
    }
}

/// Question bank statistics shown on the home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizStats {
    pub total_questions: u64,
    #[serde(rename = "question_types", default)]
    pub question_type_counts: BTreeMap<String, u64>,
}
