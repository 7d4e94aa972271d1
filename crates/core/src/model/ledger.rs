use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Question, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("option {index} is out of range for question {id} ({count} options)")]
    OptionOutOfRange {
        id: QuestionId,
        index: usize,
        count: usize,
    },

    #[error("answers are frozen while a submission is in flight")]
    Frozen,
}

/// Answers chosen during one session, keyed by question.
///
/// Entries are only ever inserted or overwritten. The ledger is dropped as a
/// whole when the session ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerLedger {
    answers: BTreeMap<QuestionId, usize>,
    frozen: bool,
}

impl AnswerLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the chosen option for `question`, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::OptionOutOfRange` when `option_index` does not name
    /// one of the question's options, and `LedgerError::Frozen` while the
    /// ledger is locked for submission.
    pub fn record(&mut self, question: &Question, option_index: usize) -> Result<(), LedgerError> {
        if self.frozen {
            return Err(LedgerError::Frozen);
        }
        if !question.has_option(option_index) {
            return Err(LedgerError::OptionOutOfRange {
                id: question.id(),
                index: option_index,
                count: question.option_count(),
            });
        }
        self.answers.insert(question.id(), option_index);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<usize> {
        self.answers.get(&id).copied()
    }

    /// Number of distinct questions that have an answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    pub(crate) fn thaw(&mut self) {
        self.frozen = false;
    }

    /// Answers in question-id order.
    pub fn entries(&self) -> impl Iterator<Item = (QuestionId, usize)> + '_ {
        self.answers.iter().map(|(id, index)| (*id, *index))
    }

    /// Snapshot of the ledger in the shape the service expects.
    ///
    /// Unanswered questions are absent; the service scores them as incorrect.
    #[must_use]
    pub fn to_submission(&self) -> AnswerSubmission {
        AnswerSubmission {
            answers: self.answers.clone(),
        }
    }
}

/// Body of a submission: `{ "answers": { "<question id>": <option index> } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub answers: BTreeMap<QuestionId, usize>,
}

impl AnswerSubmission {
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<usize> {
        self.answers.get(&id).copied()
    }
}
