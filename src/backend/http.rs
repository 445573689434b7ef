// src/backend/http.rs

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

use super::{BackendError, MemoryBackend};
use crate::models::{
    profile::Profile,
    question::RawQuizItem,
    quiz_record::{QuizHistoryEntry, QuizResult},
};

/// `MemoryBackend` over plain HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// `base_url` must end with `/` (see `config::parse_backend_url`).
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path)?)
    }
}

fn check(endpoint: &'static str, response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::Status {
            endpoint,
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl MemoryBackend for HttpBackend {
    async fn generate_quiz(&self, count: Option<u32>) -> Result<Vec<RawQuizItem>, BackendError> {
        let mut request = self.client.get(self.endpoint("generate-quiz")?);
        if let Some(count) = count {
            request = request.query(&[("nb_quiz", count)]);
        }

        let response = check("/generate-quiz", request.send().await?)?;
        Ok(response.json().await?)
    }

    async fn profiles(&self) -> Result<Vec<Profile>, BackendError> {
        let response = self.client.get(self.endpoint("profiles")?).send().await?;

        Ok(check("/profiles", response)?.json().await?)
    }

    async fn finish_quiz(&self, result: &QuizResult) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.endpoint("finish-quiz")?)
            .json(result)
            .send()
            .await?;

        check("/finish-quiz", response)?;
        Ok(())
    }

    async fn submit_answer(&self, question_id: &str, success: bool) -> Result<(), BackendError> {
        let success = if success { "true" } else { "false" };
        let response = self
            .client
            .post(self.endpoint("submit-answer")?)
            .query(&[("question_id", question_id), ("success", success)])
            .send()
            .await?;

        check("/submit-answer", response)?;
        Ok(())
    }

    async fn quiz_history(&self) -> Result<Vec<QuizHistoryEntry>, BackendError> {
        let response = self.client.get(self.endpoint("quiz-history")?).send().await?;

        Ok(check("/quiz-history", response)?.json().await?)
    }
}
