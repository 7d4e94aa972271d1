use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has no options")]
    NoOptions { id: QuestionId },

    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },
}

/// A single multiple-choice question as presented to the player.
///
/// The correct option is deliberately absent: the service keeps it until the
/// answers have been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    kind: Option<String>,
    options: Vec<String>,
}

impl Question {
    /// Build a question, validating the prompt and option list.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt and
    /// `QuestionError::NoOptions` when there is nothing to choose from.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        kind: Option<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions { id });
        }
        let kind = kind.filter(|k| !k.trim().is_empty());
        Ok(Self {
            id,
            prompt,
            kind,
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Category tag such as `multiple_choice` or `quote`, if the service sent one.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }
}

/// The ordered questions of one quiz, fixed once the session starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizSet {
    questions: Vec<Question>,
    count: usize,
}

impl QuizSet {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let count = questions.len();
        Self { questions, count }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Quiz sizes offered on the home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizLength {
    Quick,
    #[default]
    Standard,
    Challenge,
}

impl QuizLength {
    pub const ALL: [QuizLength; 3] = [Self::Quick, Self::Standard, Self::Challenge];

    #[must_use]
    pub fn question_count(self) -> u32 {
        match self {
            Self::Quick => 5,
            Self::Standard => 10,
            Self::Challenge => 20,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Quick => "Quick Quiz",
            Self::Standard => "Standard Quiz",
            Self::Challenge => "Challenge Mode",
        }
    }
}
