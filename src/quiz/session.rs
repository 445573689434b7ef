// src/quiz/session.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    models::{
        profile::SessionContext,
        question::Question,
        quiz_record::{QuizKind, QuizResult},
    },
    quiz::{
        QuizError,
        recap::{self, RecapItem},
    },
    utils::token::random_token,
};

/// Lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    /// Waiting for the question set.
    Loading,
    /// The backend had nothing to ask. Terminal.
    Empty,
    InProgress,
    /// Every question answered. Terminal.
    Completed,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizState::Loading => f.write_str("loading"),
            QuizState::Empty => f.write_str("empty"),
            QuizState::InProgress => f.write_str("in progress"),
            QuizState::Completed => f.write_str("completed"),
        }
    }
}

/// An answer as it was recorded by `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAnswer {
    pub question_id: String,
    pub answer: String,
    pub correct: bool,
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the next question.
    Next(RecordedAnswer),
    /// That was the last question; the result is ready to submit.
    Completed(RecordedAnswer, QuizResult),
}

/// One run through a quiz.
///
/// The score and the answer history only grow, and only through `advance`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    kind: QuizKind,
    context: SessionContext,
    state: QuizState,
    questions: Vec<Question>,
    current_index: usize,
    selected: Option<String>,
    score: u32,
    answers: Vec<String>,
    result: Option<QuizResult>,
}

impl QuizSession {
    pub fn new(id: Uuid, kind: QuizKind, context: SessionContext) -> Self {
        Self {
            id,
            kind,
            context,
            state: QuizState::Loading,
            questions: Vec::new(),
            current_index: 0,
            selected: None,
            score: 0,
            answers: Vec::new(),
            result: None,
        }
    }

    /// Hands the built question set to a loading session.
    ///
    /// An empty set puts the session in `Empty` instead of `InProgress`.
    pub fn load(&mut self, questions: Vec<Question>) -> Result<QuizState, QuizError> {
        self.expect_state(QuizState::Loading, "load")?;

        self.state = if questions.is_empty() {
            QuizState::Empty
        } else {
            QuizState::InProgress
        };
        self.questions = questions;
        self.current_index = 0;

        Ok(self.state)
    }

    /// Records the tentative pick for the current question. Repeated calls overwrite it.
    pub fn select_option(&mut self, option: &str) -> Result<(), QuizError> {
        self.expect_state(QuizState::InProgress, "select an option in")?;

        let question = &self.questions[self.current_index];
        if !question.options.iter().any(|o| o == option) {
            return Err(QuizError::UnknownOption(option.to_string()));
        }

        self.selected = Some(option.to_string());
        Ok(())
    }

    /// Commits the current selection and moves on.
    ///
    /// `rng` and `now` are only used when this completes the quiz, to stamp
    /// the result.
    pub fn advance<R: Rng>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Advance, QuizError> {
        self.expect_state(QuizState::InProgress, "advance")?;

        let answer = self.selected.take().ok_or(QuizError::NoSelection)?;
        let question = &self.questions[self.current_index];
        let correct = answer == question.correct_answer;
        let recorded = RecordedAnswer {
            question_id: question.id.clone(),
            answer: answer.clone(),
            correct,
        };

        self.answers.push(answer);
        if correct {
            self.score += 1;
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            return Ok(Advance::Next(recorded));
        }

        let result = QuizResult {
            quiz_id: random_token(rng),
            kind: self.kind,
            score: self.score,
            total_questions: self.questions.len() as u32,
            completed_at: now,
            profile_id: self.context.profile_id,
        };
        self.state = QuizState::Completed;
        self.result = Some(result.clone());

        Ok(Advance::Completed(recorded, result))
    }

    /// Per-question view of a completed session.
    pub fn recap(&self) -> Result<Vec<RecapItem>, QuizError> {
        self.expect_state(QuizState::Completed, "recap")?;

        Ok(recap::render(&self.questions, &self.answers))
    }

    fn expect_state(&self, expected: QuizState, action: &'static str) -> Result<(), QuizError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }
}
