// src/quiz/recap.rs

use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// How an option is highlighted in the recap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    Correct,
    /// The user's pick, and it was wrong.
    WrongPick,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecapOption {
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecapItem {
    pub question_id: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: Vec<RecapOption>,
    pub correct_answer: String,
    pub user_answer: String,
    pub is_correct: bool,
}

/// Pairs every question with the answer recorded for it.
pub fn render(questions: &[Question], answers: &[String]) -> Vec<RecapItem> {
    questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| RecapItem {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            image: question.image.clone(),
            options: question
                .options
                .iter()
                .map(|option| RecapOption {
                    text: option.clone(),
                    mark: mark(option, &question.correct_answer, answer),
                })
                .collect(),
            correct_answer: question.correct_answer.clone(),
            user_answer: answer.clone(),
            is_correct: *answer == question.correct_answer,
        })
        .collect()
}

fn mark(option: &str, correct: &str, picked: &str) -> OptionMark {
    if option == correct {
        OptionMark::Correct
    } else if option == picked {
        OptionMark::WrongPick
    } else {
        OptionMark::Neutral
    }
}
