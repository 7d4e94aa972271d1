use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{AnswerSubmission, QuizSet, QuizStats, ResultSet};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{QuizApi, RemoteError};
use crate::wire::QuizSetWire;

/// `QuizApi` over the service's JSON HTTP endpoints.
#[derive(Clone, Debug)]
pub struct HttpQuizApi {
    client: Client,
    base_url: Url,
}

impl HttpQuizApi {
    /// # Errors
    ///
    /// Returns `RemoteError::Service` if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Service(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteError::Service(format!("invalid endpoint {path}: {e}")))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Service(format!("service returned status {status}")));
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn fetch_question_set(&self, count: u32) -> Result<QuizSet, RemoteError> {
        let url = self.endpoint(&format!("api/quiz/{count}"))?;
        tracing::debug!(%url, count, "fetching question set");
        let response = self.client.get(url).send().await?;
        let wire: QuizSetWire = decode(response).await?;
        wire.into_quiz_set()
    }

    async fn submit_answers(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<ResultSet, RemoteError> {
        let url = self.endpoint("api/submit-quiz")?;
        tracing::debug!(%url, answers = submission.len(), "submitting answers");
        let response = self.client.post(url).json(submission).send().await?;
        decode(response).await
    }

    async fn fetch_stats(&self) -> Result<QuizStats, RemoteError> {
        let url = self.endpoint("api/stats")?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}
