//! Shapes of the quiz service's JSON payloads.
//!
//! Results and stats decode straight into domain types; questions go through
//! these DTOs so the correct answer never reaches the client model.

use quiz_core::model::{Question, QuestionId, QuizSet};
use serde::Deserialize;

use crate::api::RemoteError;

#[derive(Debug, Deserialize)]
pub(crate) struct QuizSetWire {
    #[serde(default)]
    questions: Vec<QuestionWire>,
    #[serde(default, alias = "total_questions", alias = "count")]
    total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct QuestionWire {
    id: QuestionId,
    question: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    options: Vec<String>,
}

impl QuizSetWire {
    pub(crate) fn into_quiz_set(self) -> Result<QuizSet, RemoteError> {
        let received = self.questions.len();
        if let Some(total) = self.total.filter(|total| *total != received) {
            tracing::warn!(reported = total, received, "question count mismatch");
        }

        let questions = self
            .questions
            .into_iter()
            .map(|wire| {
                Question::new(wire.id, wire.question, wire.kind, wire.options)
                    .map_err(|e| RemoteError::Service(format!("malformed question: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuizSet::new(questions))
    }
}
