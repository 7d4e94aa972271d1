use std::sync::Arc;

use remote::{HttpQuizApi, InMemoryQuizApi, QuizApi};

use crate::Clock;
use crate::config::ClientConfig;
use crate::error::AppServicesError;
use crate::sessions::QuizLoopService;
use crate::stats_service::StatsService;

/// Assembles app-facing services around one quiz service adapter.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
    offline: bool,
}

impl AppServices {
    /// Build services talking to the HTTP quiz service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let api = HttpQuizApi::new(config.base_url.clone(), config.timeout)?;
        tracing::info!(
            base_url = %api.base_url(),
            timeout_secs = config.timeout.as_secs(),
            "using remote quiz service"
        );
        Ok(Self::with_api(clock, Arc::new(api)))
    }

    /// Build services backed by the bundled sample questions.
    #[must_use]
    pub fn offline(clock: Clock) -> Self {
        tracing::info!("using bundled sample questions");
        let mut services = Self::with_api(clock, Arc::new(InMemoryQuizApi::sample()));
        services.offline = true;
        services
    }

    #[must_use]
    pub fn with_api(clock: Clock, api: Arc<dyn QuizApi>) -> Self {
        Self {
            quiz_loop: Arc::new(QuizLoopService::new(clock, Arc::clone(&api))),
            stats: Arc::new(StatsService::new(api)),
            offline: false,
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.offline
    }
}
