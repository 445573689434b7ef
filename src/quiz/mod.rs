// src/quiz/mod.rs

//! Quiz flow: building question sets, driving a session through its states,
//! and reading the results back out.

use std::fmt;

pub mod builder;
pub mod history;
pub mod ranking;
pub mod recap;
pub mod session;

use session::QuizState;

/// Rejections raised by the session controller. None of them mutate the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// `advance` was called before any option was selected.
    NoSelection,

    /// The selected option is not one of the current question's options.
    UnknownOption(String),

    /// The operation is not allowed in the session's current state.
    InvalidTransition {
        state: QuizState,
        action: &'static str,
    },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::NoSelection => f.write_str("No option selected for the current question"),
            QuizError::UnknownOption(option) => {
                write!(f, "'{}' is not an option of the current question", option)
            }
            QuizError::InvalidTransition { state, action } => {
                write!(f, "Cannot {} a quiz that is {}", action, state)
            }
        }
    }
}

impl std::error::Error for QuizError {}
