// src/quiz/builder.rs

use rand::{Rng, seq::SliceRandom};

use crate::models::{
    profile::Profile,
    question::{Question, RawQuizItem},
    quiz_record::QuizKind,
};

/// Prompt shown on every face-recognition question.
pub const FACE_PROMPT: &str = "Who is this person?";

/// Other names offered next to the right one on a face-recognition question.
pub const FACE_DISTRACTORS: usize = 3;

/// Raw backend data for one quiz, tagged with the kind it feeds.
#[derive(Debug, Clone)]
pub enum QuizSource {
    Recollection(Vec<RawQuizItem>),
    FaceRecognition(Vec<Profile>),
}

impl QuizSource {
    pub fn kind(&self) -> QuizKind {
        match self {
            QuizSource::Recollection(_) => QuizKind::Recollection,
            QuizSource::FaceRecognition(_) => QuizKind::FaceRecognition,
        }
    }
}

/// Turns backend data into a question list with shuffled options.
///
/// Yields an empty list when the source is empty; the caller decides how to
/// present that.
pub fn build<R: Rng>(source: QuizSource, rng: &mut R) -> Vec<Question> {
    match source {
        QuizSource::Recollection(items) => build_recollection(items, rng),
        QuizSource::FaceRecognition(profiles) => build_face_recognition(&profiles, rng),
    }
}

/// One question per item: the correct answer merged with its distractors.
pub fn build_recollection<R: Rng>(items: Vec<RawQuizItem>, rng: &mut R) -> Vec<Question> {
    items
        .into_iter()
        .map(|item| {
            let mut options = Vec::with_capacity(item.bad_answer.len() + 1);
            options.push(item.correct_answer.clone());
            for bad in item.bad_answer {
                if !options.contains(&bad) {
                    options.push(bad);
                }
            }
            options.shuffle(rng);

            Question {
                id: item.question_id,
                prompt: item.question,
                options,
                correct_answer: item.correct_answer,
                image: None,
            }
        })
        .collect()
}

/// One question per profile: its own name plus the first distinct names of
/// the other profiles, in listing order.
pub fn build_face_recognition<R: Rng>(profiles: &[Profile], rng: &mut R) -> Vec<Question> {
    profiles
        .iter()
        .map(|profile| {
            let mut options = vec![profile.name.clone()];
            for other in profiles.iter().filter(|p| p.id != profile.id) {
                if options.len() > FACE_DISTRACTORS {
                    break;
                }
                if !options.contains(&other.name) {
                    options.push(other.name.clone());
                }
            }
            options.shuffle(rng);

            Question {
                id: profile.id.to_string(),
                prompt: FACE_PROMPT.to_string(),
                options,
                correct_answer: profile.name.clone(),
                image: Some(profile.image.clone()),
            }
        })
        .collect()
}
