use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{backend::MemoryBackend, error::AppError};

/// Lists the family profiles for the profile selection page.
pub async fn list_profiles(
    State(backend): State<Arc<dyn MemoryBackend>>,
) -> Result<impl IntoResponse, AppError> {
    let profiles = backend.profiles().await.map_err(|e| {
        tracing::error!("Failed to fetch profiles: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(profiles))
}
