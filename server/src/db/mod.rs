pub mod models;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use models::*;
pub use sqlite::SqliteLedger;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// The backing store could not be opened, read, or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(sqlx::Error),

    /// The store answered but a stored row does not fit the score schema.
    #[error("unreadable score row: {0}")]
    UnreadableRow(sqlx::Error),
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
                LedgerError::UnreadableRow(err)
            }
            _ => LedgerError::StorageUnavailable(err),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Append-only store of score submissions.
///
/// Entries are never updated or removed. Every ranked query orders by score
/// descending, then by timestamp descending so the most recent of two equal
/// scores comes first. `PublicScore` and `GameScore` carry no origin address;
/// only `global_top_scores_admin` exposes it.
#[async_trait]
pub trait ScoreLedger: Send + Sync {
    /// Creates the `scores` table if it does not exist yet. Safe on every start.
    async fn init(&self) -> LedgerResult<()>;

    /// Records one submission and returns its id. The store assigns the timestamp.
    async fn append(&self, score: &NewScore) -> LedgerResult<i64>;

    async fn top_scores_for_game(&self, game_id: &str, limit: u32) -> LedgerResult<Vec<GameScore>>;
    async fn global_top_scores_public(&self, limit: u32) -> LedgerResult<Vec<PublicScore>>;
    async fn global_top_scores_admin(&self, limit: u32) -> LedgerResult<Vec<AdminScore>>;

    /// Submission count and best score per game id.
    async fn game_stats(&self) -> LedgerResult<Vec<GameStats>>;
}
