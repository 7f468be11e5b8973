use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score payload as posted by a game page. Every field is optional on the
/// wire so that missing values produce a submission error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubmission {
    pub game_id: Option<String>,
    pub score: Option<i64>,
}

/// A submission that passed the shape check and may be appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSubmission {
    pub game_id: String,
    pub score: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("No data")]
    NoData,

    #[error("Missing game_id or score")]
    MissingField,
}

impl RawSubmission {
    /// Checks the two required fields. An empty `game_id` counts as missing;
    /// the score is accepted whatever its sign or magnitude.
    pub fn validate(self) -> Result<ScoreSubmission, SubmissionError> {
        match (self.game_id, self.score) {
            (Some(game_id), Some(score)) if !game_id.is_empty() => {
                Ok(ScoreSubmission { game_id, score })
            }
            _ => Err(SubmissionError::MissingField),
        }
    }
}
