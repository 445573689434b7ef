// src/models/profile.rs

use serde::{Deserialize, Serialize};

/// A family member as returned by the backend's `/profiles` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    /// Base64-encoded portrait.
    pub image: String,
}

/// Who is taking the quiz. Handed to a session when it is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub profile_id: Option<i64>,
}
