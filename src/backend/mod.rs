// src/backend/mod.rs

//! Client side of the memory backend: profiles, generated quizzes and the
//! quiz log all live there.

use std::fmt;

use async_trait::async_trait;

use crate::models::{
    profile::Profile,
    question::RawQuizItem,
    quiz_record::{QuizHistoryEntry, QuizResult},
};

pub mod http;

pub use http::HttpBackend;

#[derive(Debug)]
pub enum BackendError {
    /// Connection, TLS or body decoding failure.
    Request(reqwest::Error),

    /// The backend answered with a non-success status.
    Status { endpoint: &'static str, status: u16 },

    /// An endpoint URL could not be built from the base URL.
    Url(url::ParseError),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Request(e) => write!(f, "Backend request failed: {}", e),
            BackendError::Status { endpoint, status } => {
                write!(f, "Backend returned {} for {}", status, endpoint)
            }
            BackendError::Url(e) => write!(f, "Invalid backend URL: {}", e),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Request(err)
    }
}

impl From<url::ParseError> for BackendError {
    fn from(err: url::ParseError) -> Self {
        BackendError::Url(err)
    }
}

/// Operations the quiz service needs from the memory backend.
#[async_trait]
pub trait MemoryBackend: Send + Sync {
    /// `GET /generate-quiz`, optionally with `nb_quiz`.
    async fn generate_quiz(&self, count: Option<u32>) -> Result<Vec<RawQuizItem>, BackendError>;

    /// `GET /profiles`.
    async fn profiles(&self) -> Result<Vec<Profile>, BackendError>;

    /// `POST /finish-quiz`.
    async fn finish_quiz(&self, result: &QuizResult) -> Result<(), BackendError>;

    /// `POST /submit-answer`, per-question telemetry.
    async fn submit_answer(&self, question_id: &str, success: bool) -> Result<(), BackendError>;

    /// `GET /quiz-history`.
    async fn quiz_history(&self) -> Result<Vec<QuizHistoryEntry>, BackendError>;
}
