// tests/quiz_tests.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};
use recall_quiz::{
    backend::{BackendError, MemoryBackend},
    config::{Config, DEFAULT_SESSION_TTL_SECS, parse_backend_url},
    models::{
        profile::{Profile, SessionContext},
        question::RawQuizItem,
        quiz_record::{QuizHistoryEntry, QuizKind, QuizResult},
    },
    quiz::{
        QuizError,
        builder::{QuizSource, build},
        session::{QuizSession, QuizState},
    },
    routes,
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// In-process backend used through the `MemoryBackend` seam.
#[derive(Default)]
struct StubBackend {
    items: Vec<RawQuizItem>,
    finished: Mutex<Vec<QuizResult>>,
}

#[async_trait]
impl MemoryBackend for StubBackend {
    async fn generate_quiz(&self, count: Option<u32>) -> Result<Vec<RawQuizItem>, BackendError> {
        let mut items = self.items.clone();
        if let Some(count) = count {
            items.truncate(count as usize);
        }
        Ok(items)
    }

    async fn profiles(&self) -> Result<Vec<Profile>, BackendError> {
        Ok(Vec::new())
    }

    async fn finish_quiz(&self, result: &QuizResult) -> Result<(), BackendError> {
        self.finished.lock().unwrap().push(result.clone());
        Ok(())
    }

    async fn submit_answer(&self, _question_id: &str, _success: bool) -> Result<(), BackendError> {
        Ok(())
    }

    async fn quiz_history(&self) -> Result<Vec<QuizHistoryEntry>, BackendError> {
        Ok(Vec::new())
    }
}

fn test_config() -> Config {
    Config {
        backend_url: parse_backend_url("http://backend.invalid").unwrap(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origin: "http://localhost:3000".to_string(),
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        answer_telemetry: false,
        quiz_seed: Some(99),
        session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
    }
}

fn raw(id: &str, correct: &str, bad: &[&str]) -> RawQuizItem {
    RawQuizItem {
        question_id: id.to_string(),
        question: format!("Question {}", id),
        correct_answer: correct.to_string(),
        bad_answer: bad.iter().map(|s| s.to_string()).collect(),
    }
}

async fn call(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn router_drives_a_session_through_the_backend_seam() {
    let backend = Arc::new(StubBackend {
        items: vec![
            raw("1", "Paris", &["London", "Berlin", "Madrid"]),
            raw("2", "Mars", &["Venus", "Jupiter", "Saturn"]),
        ],
        ..Default::default()
    });
    let app = routes::create_router(AppState::new(backend.clone(), test_config()));

    let (status, view) = call(
        &app,
        "POST",
        "/api/quiz/sessions",
        Some(serde_json::json!({"kind": "recollection"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = view["session_id"].as_str().unwrap().to_string();

    for pick in ["London", "Mars"] {
        let (status, _) = call(
            &app,
            "POST",
            &format!("/api/quiz/sessions/{}/select", id),
            Some(serde_json::json!({ "option": pick })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, "POST", &format!("/api/quiz/sessions/{}/advance", id), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, view) = call(&app, "GET", &format!("/api/quiz/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["state"], "completed");
    assert_eq!(view["score"], 1);

    for _ in 0..100 {
        if !backend.finished.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    let finished = backend.finished.lock().unwrap().clone();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].score, 1);
    assert_eq!(finished[0].total_questions, 2);
    assert_eq!(finished[0].kind, QuizKind::Recollection);
}

#[tokio::test]
async fn discarding_an_unknown_session_is_not_found() {
    let app = routes::create_router(AppState::new(
        Arc::new(StubBackend::default()),
        test_config(),
    ));

    let (status, body) = call(
        &app,
        "DELETE",
        &format!("/api/quiz/sessions/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn empty_starts_leave_no_sessions_behind() {
    let state = AppState::new(Arc::new(StubBackend::default()), test_config());
    let app = routes::create_router(state.clone());

    for _ in 0..50 {
        let (status, view) = call(
            &app,
            "POST",
            "/api/quiz/sessions",
            Some(serde_json::json!({"kind": "recollection"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(view["state"], "empty");
    }

    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn idle_sessions_expire() {
    let backend = Arc::new(StubBackend {
        items: vec![raw("1", "Paris", &["London", "Berlin", "Madrid"])],
        ..Default::default()
    });
    let config = Config {
        session_ttl_secs: 0,
        ..test_config()
    };
    let state = AppState::new(backend, config);
    let app = routes::create_router(state.clone());

    let (_, first) = call(
        &app,
        "POST",
        "/api/quiz/sessions",
        Some(serde_json::json!({"kind": "recollection"})),
    )
    .await;
    let (status, _) = call(
        &app,
        "POST",
        "/api/quiz/sessions",
        Some(serde_json::json!({"kind": "recollection"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(state.sessions.len(), 1);

    let abandoned = first["session_id"].as_str().unwrap();
    let (status, _) = call(&app, "GET", &format!("/api/quiz/sessions/{}", abandoned), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn random_play_keeps_session_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);

    for round in 0..50 {
        let count = rng.gen_range(0..8);
        let items: Vec<RawQuizItem> = (0..count)
            .map(|i| raw(&i.to_string(), "right", &["w1", "w2", "w3"]))
            .collect();

        let questions = build(QuizSource::Recollection(items), &mut rng);
        assert_eq!(questions.len(), count);
        for q in &questions {
            assert_eq!(q.options.iter().filter(|o| **o == q.correct_answer).count(), 1);
        }

        let mut session = QuizSession::new(
            Uuid::new_v4(),
            QuizKind::Recollection,
            SessionContext { profile_id: Some(round) },
        );
        let state = session.load(questions).unwrap();
        if count == 0 {
            assert_eq!(state, QuizState::Empty);
            continue;
        }

        let mut last_score = 0;
        let mut last_index = 0;
        while session.state() == QuizState::InProgress {
            match rng.gen_range(0..3) {
                0 => {
                    let options = session.current_question().unwrap().options.clone();
                    let pick = &options[rng.gen_range(0..options.len())];
                    session.select_option(pick).unwrap();
                }
                1 => {
                    let had_selection = session.selected().is_some();
                    let answered = session.answers().len();
                    match session.advance(&mut rng, Utc::now()) {
                        Ok(_) => assert!(had_selection),
                        Err(e) => {
                            assert_eq!(e, QuizError::NoSelection);
                            assert_eq!(session.answers().len(), answered);
                        }
                    }
                }
                _ => {
                    assert!(session.select_option("not-an-option").is_err());
                }
            }

            assert!(session.score() >= last_score);
            assert!(session.current_index() >= last_index);
            assert!(session.score() as usize <= session.questions().len());
            assert!(session.answers().len() <= session.questions().len());
            last_score = session.score();
            last_index = session.current_index();
        }

        assert_eq!(session.state(), QuizState::Completed);
        assert_eq!(session.answers().len(), count);
        assert_eq!(session.current_index(), count - 1);
        let result = session.result().unwrap();
        assert_eq!(result.score, session.score());
        assert_eq!(result.total_questions as usize, count);
        assert_eq!(result.profile_id, Some(round));
        assert_eq!(session.recap().unwrap().len(), count);
    }
}
