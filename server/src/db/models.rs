use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

/// Text layout of the `timestamp` column, e.g. `2026-10-18 12:00:00.123`.
/// Rows written with `CURRENT_TIMESTAMP` have no fractional part.
pub const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Serializes a timestamp the way the store writes it rather than as ISO 8601.
pub fn serialize_store_timestamp<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(STORE_TIMESTAMP_FORMAT))
}

/// A submission about to be appended. `id` and `timestamp` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScore {
    pub game_id: String,
    pub player_name: String,
    pub score: i64,
    pub ip_address: Option<String>,
}

/// Per-game leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct GameScore {
    pub player_name: String,
    pub score: i64,
    #[serde(serialize_with = "serialize_store_timestamp")]
    pub timestamp: NaiveDateTime,
}

/// Global leaderboard row safe to show to anyone.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PublicScore {
    pub game_id: String,
    pub player_name: String,
    pub score: i64,
    #[serde(serialize_with = "serialize_store_timestamp")]
    pub timestamp: NaiveDateTime,
}

/// Global leaderboard row including the submitter's network origin.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AdminScore {
    pub game_id: String,
    pub player_name: String,
    pub score: i64,
    pub ip_address: Option<String>,
    #[serde(serialize_with = "serialize_store_timestamp")]
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct GameStats {
    pub game_id: String,
    pub plays: i64,
    pub best_score: i64,
}
