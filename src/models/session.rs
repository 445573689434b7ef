// src/models/session.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::{
        question::PublicQuestion,
        quiz_record::{QuizKind, QuizResult},
    },
    quiz::{
        ranking::FocusMember,
        recap::RecapItem,
        session::{QuizSession, QuizState},
    },
};

/// DTO for starting a quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct StartQuizRequest {
    pub kind: QuizKind,

    /// Profile of the person playing, if one was picked.
    pub profile_id: Option<i64>,

    /// Number of recollection questions to ask the backend for.
    #[validate(range(min = 1, max = 50))]
    pub nb_quiz: Option<u32>,
}

/// DTO for choosing an option on the current question.
#[derive(Debug, Deserialize, Validate)]
pub struct SelectOptionRequest {
    #[validate(length(min = 1, max = 500))]
    pub option: String,
}

/// What the UI sees of a session. Never carries the current correct answer.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub kind: QuizKind,
    pub state: QuizState,
    pub current_index: usize,
    pub total_questions: usize,
    pub score: u32,
    pub selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<PublicQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QuizResult>,
}

impl From<&QuizSession> for SessionView {
    fn from(session: &QuizSession) -> Self {
        let question = match session.state() {
            QuizState::InProgress => session.current_question().map(PublicQuestion::from),
            _ => None,
        };

        Self {
            session_id: session.id(),
            kind: session.kind(),
            state: session.state(),
            current_index: session.current_index(),
            total_questions: session.questions().len(),
            score: session.score(),
            selected: session.selected().map(str::to_owned),
            question,
            result: session.result().cloned(),
        }
    }
}

/// DTO for the recap of a completed session.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecapResponse {
    pub session_id: Uuid,
    pub kind: QuizKind,
    pub score: u32,
    pub total_questions: usize,
    pub items: Vec<RecapItem>,
    /// Only filled for face-recognition quizzes.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub members_to_focus: Vec<FocusMember>,
}
