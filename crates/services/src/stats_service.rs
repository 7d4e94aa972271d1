use std::sync::Arc;

use quiz_core::model::QuizStats;
use remote::QuizApi;

use crate::error::{QuizServiceError, RemoteOp};

/// Best-effort question bank statistics for the home screen.
#[derive(Clone)]
pub struct StatsService {
    api: Arc<dyn QuizApi>,
}

impl StatsService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>) -> Self {
        Self { api }
    }

    /// Stats, or `None` when the service cannot provide them.
    ///
    /// Failures are logged and never block starting a quiz.
    pub async fn load(&self) -> Option<QuizStats> {
        match self.try_load().await {
            Ok(stats) => Some(stats),
            Err(err) => {
                tracing::warn!(error = %err, "stats unavailable");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::{Network, Service}` if the fetch fails.
    pub async fn try_load(&self) -> Result<QuizStats, QuizServiceError> {
        let stats = self
            .api
            .fetch_stats()
            .await
            .map_err(|err| QuizServiceError::remote(RemoteOp::LoadStats, err))?;
        tracing::debug!(
            total = stats.total_questions,
            kinds = stats.question_type_counts.len(),
            "stats loaded"
        );
        Ok(stats)
    }
}
