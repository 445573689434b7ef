// src/models/quiz_record.rs

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Which flavour of quiz a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizKind {
    /// Trivia about recorded memories.
    #[serde(alias = "souvenirs")]
    Recollection,
    /// Match a portrait to a family member's name.
    #[serde(alias = "face")]
    FaceRecognition,
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizKind::Recollection => f.write_str("recollection"),
            QuizKind::FaceRecognition => f.write_str("face-recognition"),
        }
    }
}

/// Summary of a finished session, posted once to `/finish-quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Fresh random token, unrelated to the session id.
    pub quiz_id: Uuid,
    #[serde(rename = "type")]
    pub kind: QuizKind,
    pub score: u32,
    pub total_questions: u32,
    #[serde(rename = "date")]
    pub completed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<i64>,
}

/// One past quiz as stored by the backend (`/quiz-history`).
///
/// The backend's id may be a string or a number and is relayed untouched.
/// Dates without an offset are taken as UTC; anything unreadable becomes `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizHistoryEntry {
    pub id: Value,
    pub score: u32,
    pub total_questions: u32,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::String(raw)) = raw else {
        return Ok(None);
    };

    if let Ok(date) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(date.with_timezone(&Utc)));
    }
    Ok(["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
        .map(|naive| naive.and_utc()))
}

/// Score band used to colour history rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Great,
    Good,
    Fair,
    Low,
}

/// DTO for a history entry enriched with its percentage and band.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(flatten)]
    pub entry: QuizHistoryEntry,
    pub percent: u32,
    pub band: ScoreBand,
}
