// src/models/question.rs

use serde::{Deserialize, Serialize};

/// A quiz item as produced by the backend's `/generate-quiz` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuizItem {
    pub question_id: String,

    /// The question text.
    pub question: String,

    pub correct_answer: String,

    /// Distractors. Usually three.
    #[serde(default)]
    pub bad_answer: Vec<String>,
}

/// A normalized question with its options already shuffled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    pub prompt: String,

    /// Contains `correct_answer` exactly once and no duplicates.
    pub options: Vec<String>,

    pub correct_answer: String,

    /// Base64-encoded picture, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// DTO for sending a question to the client while the quiz is running
/// (excludes the correct answer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            prompt: q.prompt.clone(),
            options: q.options.clone(),
            image: q.image.clone(),
        }
    }
}
