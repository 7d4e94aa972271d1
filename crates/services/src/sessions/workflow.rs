use std::sync::Arc;

use quiz_core::model::QuizLength;
use quiz_core::{Countdown, QUESTION_SECONDS, QuizSession};
use remote::QuizApi;

use crate::Clock;
use crate::error::{QuizServiceError, RemoteOp};

/// Orchestrates quiz start and answer submission against the remote service.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    api: Arc<dyn QuizApi>,
    question_seconds: i64,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn QuizApi>) -> Self {
        Self {
            clock,
            api,
            question_seconds: QUESTION_SECONDS,
        }
    }

    #[must_use]
    pub fn with_question_seconds(mut self, seconds: i64) -> Self {
        self.question_seconds = seconds;
        self
    }

    #[must_use]
    pub fn question_seconds(&self) -> i64 {
        self.question_seconds
    }

    /// Fetch a fresh question set and open a session on it.
    ///
    /// A service that returns no questions yields a session in the empty
    /// phase rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::{Network, Service}` if the fetch fails.
    pub async fn start_quiz(&self, length: QuizLength) -> Result<QuizSession, QuizServiceError> {
        let count = length.question_count();
        let quiz = self
            .api
            .fetch_question_set(count)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, requested = count, "question fetch failed");
                QuizServiceError::remote(RemoteOp::LoadQuiz, err)
            })?;

        let session = QuizSession::with_countdown(
            quiz,
            self.clock.now(),
            Countdown::new(self.question_seconds),
        );
        tracing::info!(
            session = %session.id(),
            requested = count,
            received = session.total(),
            phase = %session.phase(),
            "quiz session started"
        );
        Ok(session)
    }

    /// Commit the confirmed answers and record the outcome on `session`.
    ///
    /// On a remote failure the session returns to confirmation with every
    /// answer intact and the banner text stored as its last error.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if the session is not awaiting
    /// confirmation, or the remote error when submission fails.
    pub async fn submit(&self, session: &mut QuizSession) -> Result<(), QuizServiceError> {
        let submission = session.confirm_submit(self.clock.now())?;
        tracing::debug!(
            session = %session.id(),
            answered = submission.len(),
            total = session.total(),
            "submitting answers"
        );

        match self.api.submit_answers(&submission).await {
            Ok(results) => {
                let percentage = results.score.percentage;
                session.on_success(results)?;
                tracing::info!(session = %session.id(), percentage, "quiz scored");
                Ok(())
            }
            Err(err) => {
                let err = QuizServiceError::remote(RemoteOp::SubmitAnswers, err);
                tracing::warn!(session = %session.id(), error = %err, "submission failed");
                session.on_failure(err.user_message())?;
                Err(err)
            }
        }
    }
}
