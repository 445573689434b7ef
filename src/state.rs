use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::extract::FromRef;
use chrono::{DateTime, TimeDelta, Utc};
use rand::{SeedableRng, rngs::StdRng};
use uuid::Uuid;

use crate::{backend::MemoryBackend, config::Config, quiz::session::QuizSession};

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn MemoryBackend>,
    pub sessions: SessionStore,
    pub rng: SharedRng,
    pub config: Config,
}

impl AppState {
    pub fn new(backend: Arc<dyn MemoryBackend>, config: Config) -> Self {
        let rng = match config.quiz_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            backend,
            sessions: SessionStore::new(
                i64::try_from(config.session_ttl_secs)
                    .ok()
                    .and_then(TimeDelta::try_seconds)
                    .unwrap_or(TimeDelta::MAX),
            ),
            rng: SharedRng(Arc::new(Mutex::new(rng))),
            config,
        }
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn MemoryBackend> {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}

/// Random source for shuffles and tokens, shared by all handlers.
#[derive(Clone)]
pub struct SharedRng(Arc<Mutex<StdRng>>);

impl SharedRng {
    pub fn lock(&self) -> MutexGuard<'_, StdRng> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Live quiz sessions by id. Sessions do not share any state with each other.
///
/// The lock is only held for synchronous work on a single session. A session
/// that has not been touched for `ttl` is dropped on the next insert.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, StoredSession>>>,
    ttl: TimeDelta,
}

struct StoredSession {
    session: QuizSession,
    touched_at: DateTime<Utc>,
}

impl SessionStore {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn map(&self) -> MutexGuard<'_, HashMap<Uuid, StoredSession>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert(&self, session: QuizSession) {
        self.insert_at(session, Utc::now());
    }

    pub fn insert_at(&self, session: QuizSession, now: DateTime<Utc>) {
        let mut map = self.map();
        let before = map.len();
        map.retain(|_, stored| now - stored.touched_at < self.ttl);
        if map.len() < before {
            tracing::debug!("Expired {} idle quiz session(s)", before - map.len());
        }

        map.insert(
            session.id(),
            StoredSession {
                session,
                touched_at: now,
            },
        );
    }

    /// Runs `f` on the session, or returns `None` if there is no such session.
    /// Counts as activity for expiry.
    pub fn with<T>(&self, id: Uuid, f: impl FnOnce(&mut QuizSession) -> T) -> Option<T> {
        self.map().get_mut(&id).map(|stored| {
            stored.touched_at = Utc::now();
            f(&mut stored.session)
        })
    }

    pub fn remove(&self, id: Uuid) -> Option<QuizSession> {
        self.map().remove(&id).map(|stored| stored.session)
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}
