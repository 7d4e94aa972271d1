use async_trait::async_trait;
use quiz_core::model::{AnswerSubmission, QuizSet, QuizStats, ResultSet};
use thiserror::Error;

/// Errors surfaced by quiz service adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RemoteError {
    /// The service could not be reached (connect failure, timeout, dropped connection).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered, but not with something usable.
    #[error("service error: {0}")]
    Service(String),
}

impl RemoteError {
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_status() || err.is_builder() {
            Self::Service(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Contract of the remote quiz service.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// Fetch a fresh set of up to `count` questions.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Network` when unreachable, `RemoteError::Service`
    /// for error statuses or malformed payloads.
    async fn fetch_question_set(&self, count: u32) -> Result<QuizSet, RemoteError>;

    /// Send the answers of a session and receive its score.
    ///
    /// # Errors
    ///
    /// Same classification as [`QuizApi::fetch_question_set`].
    async fn submit_answers(&self, submission: &AnswerSubmission)
    -> Result<ResultSet, RemoteError>;

    /// Question bank statistics for the home screen.
    ///
    /// # Errors
    ///
    /// Same classification as [`QuizApi::fetch_question_set`].
    async fn fetch_stats(&self) -> Result<QuizStats, RemoteError>;
}
