// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    backend::{BackendError, MemoryBackend},
    config::FOCUS_MEMBER_LIMIT,
    error::AppError,
    models::{
        profile::SessionContext,
        quiz_record::{HistoryItem, QuizKind},
        session::{RecapResponse, SelectOptionRequest, SessionView, StartQuizRequest},
    },
    quiz::{
        QuizError,
        builder::{self, QuizSource},
        ranking,
        session::{Advance, QuizSession, QuizState},
    },
    state::{AppState, SessionStore},
    utils::token::random_token,
};

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Quiz session {} not found", id))
}

/// Fetches whatever the quiz kind is built from.
async fn fetch_source(
    backend: &dyn MemoryBackend,
    kind: QuizKind,
    count: Option<u32>,
) -> Result<QuizSource, BackendError> {
    Ok(match kind {
        QuizKind::Recollection => QuizSource::Recollection(backend.generate_quiz(count).await?),
        QuizKind::FaceRecognition => QuizSource::FaceRecognition(backend.profiles().await?),
    })
}

/// Starts a quiz session.
///
/// * Registers the session as `loading` while the backend is queried.
/// * Builds the question set and loads it.
/// * Returns 201 with the session in `in_progress`, or in `empty` when the
///   backend had nothing to ask. Empty sessions are not kept.
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let id = random_token(&mut *state.rng.lock());
    let context = SessionContext {
        profile_id: req.profile_id,
    };
    state.sessions.insert(QuizSession::new(id, req.kind, context));

    let source = match fetch_source(state.backend.as_ref(), req.kind, req.nb_quiz).await {
        Ok(source) => source,
        Err(e) => {
            state.sessions.remove(id);
            tracing::error!("Failed to fetch {} quiz data: {}", req.kind, e);
            return Err(e.into());
        }
    };

    let questions = builder::build(source, &mut *state.rng.lock());
    let view = state
        .sessions
        .with(id, |session| {
            session.load(questions)?;
            Ok::<_, QuizError>(SessionView::from(&*session))
        })
        .ok_or_else(|| session_not_found(id))??;

    // Empty is terminal; the session is not kept.
    if view.state == QuizState::Empty {
        state.sessions.remove(id);
        tracing::info!("No {} quiz data available, session {} dropped", req.kind, id);
        return Ok((StatusCode::CREATED, Json(view)));
    }

    tracing::info!(
        "Started {} quiz {} with {} question(s) (profile {:?})",
        req.kind,
        id,
        view.total_questions,
        context.profile_id
    );

    Ok((StatusCode::CREATED, Json(view)))
}

/// Returns the current view of a session.
pub async fn get_session(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = sessions
        .with(id, |session| SessionView::from(&*session))
        .ok_or_else(|| session_not_found(id))?;

    Ok(Json(view))
}

/// Selects an option on the current question. Can be called again to change it.
pub async fn select_option(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectOptionRequest>,
) -> Result<Json<SessionView>, AppError> {
    req.validate()?;

    let view = sessions
        .with(id, |session| {
            session.select_option(&req.option)?;
            Ok::<_, QuizError>(SessionView::from(&*session))
        })
        .ok_or_else(|| session_not_found(id))??;

    Ok(Json(view))
}

/// Commits the selected option.
///
/// Submitting the result (and optional per-answer telemetry) happens in the
/// background; a failure there does not affect the response.
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (outcome, view) = state
        .sessions
        .with(id, |session| {
            let outcome = session.advance(&mut *state.rng.lock(), Utc::now())?;
            Ok::<_, QuizError>((outcome, SessionView::from(&*session)))
        })
        .ok_or_else(|| session_not_found(id))?
        .map_err(|e| {
            tracing::debug!("Rejected advance on quiz {}: {}", id, e);
            e
        })?;

    report_outcome(&state, id, outcome);

    Ok(Json(view))
}

/// Fire-and-forget reporting of an advance to the backend. No retries.
fn report_outcome(state: &AppState, session_id: Uuid, outcome: Advance) {
    let (answer, result) = match outcome {
        Advance::Next(answer) => (answer, None),
        Advance::Completed(answer, result) => (answer, Some(result)),
    };
    let telemetry = state.config.answer_telemetry;
    if !telemetry && result.is_none() {
        return;
    }

    let backend = state.backend.clone();
    tokio::spawn(async move {
        if telemetry {
            if let Err(e) = backend
                .submit_answer(&answer.question_id, answer.correct)
                .await
            {
                tracing::warn!(
                    "Failed to submit answer for question {}: {}",
                    answer.question_id,
                    e
                );
            }
        }

        if let Some(result) = result {
            match backend.finish_quiz(&result).await {
                Ok(()) => tracing::info!(
                    "Quiz {} finished: {}/{} (result {})",
                    session_id,
                    result.score,
                    result.total_questions,
                    result.quiz_id
                ),
                Err(e) => tracing::warn!("Failed to submit result of quiz {}: {}", session_id, e),
            }
        }
    });
}

/// Recap of a completed session: every option tagged correct / wrong pick / neutral.
/// Face-recognition recaps also list the people to focus on.
pub async fn get_recap(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecapResponse>, AppError> {
    let recap = sessions
        .with(id, |session| -> Result<RecapResponse, QuizError> {
            let items = session.recap()?;
            let members_to_focus = match session.kind() {
                QuizKind::FaceRecognition => ranking::members_to_focus(&items, FOCUS_MEMBER_LIMIT),
                QuizKind::Recollection => Vec::new(),
            };

            Ok(RecapResponse {
                session_id: session.id(),
                kind: session.kind(),
                score: session.score(),
                total_questions: session.questions().len(),
                items,
                members_to_focus,
            })
        })
        .ok_or_else(|| session_not_found(id))??;

    Ok(Json(recap))
}

/// Discards a session once the recap has been shown or the user leaves.
pub async fn discard_session(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sessions.remove(id).ok_or_else(|| session_not_found(id))?;

    tracing::debug!("Discarded quiz session {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Past quizzes from the backend, with percentage and score band.
pub async fn get_history(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let entries = state.backend.quiz_history().await.map_err(|e| {
        tracing::error!("Failed to fetch quiz history: {}", e);
        AppError::from(e)
    })?;

    let history: Vec<HistoryItem> = entries.into_iter().map(HistoryItem::from).collect();

    Ok(Json(history))
}
