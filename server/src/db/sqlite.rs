use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

use super::models::*;
use super::{LedgerResult, ScoreLedger};

const CREATE_SCORES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id TEXT NOT NULL,
    player_name TEXT NOT NULL,
    score INTEGER NOT NULL,
    ip_address TEXT,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

// Millisecond timestamps keep the legacy `YYYY-MM-DD HH:MM:SS` prefix, so
// rows written by older builds still sort correctly against new ones.
const INSERT_SCORE: &str = r#"
INSERT INTO scores (game_id, player_name, score, ip_address, timestamp)
VALUES (?, ?, ?, ?, strftime('%Y-%m-%d %H:%M:%f', 'now'))
"#;

// Older builds inserted scores straight from JSON, so a row may hold a REAL.
// Rows are read back as integers but ranked on the stored value.
const TOP_SCORES_FOR_GAME: &str = r#"
SELECT player_name, CAST(score AS INTEGER) AS score, timestamp FROM scores
WHERE game_id = ?
ORDER BY scores.score DESC, timestamp DESC, id DESC
LIMIT ?
"#;

const GLOBAL_TOP_SCORES_PUBLIC: &str = r#"
SELECT game_id, player_name, CAST(score AS INTEGER) AS score, timestamp FROM scores
ORDER BY scores.score DESC, timestamp DESC, id DESC
LIMIT ?
"#;

const GLOBAL_TOP_SCORES_ADMIN: &str = r#"
SELECT game_id, player_name, CAST(score AS INTEGER) AS score, ip_address, timestamp FROM scores
ORDER BY scores.score DESC, timestamp DESC, id DESC
LIMIT ?
"#;

const GAME_STATS: &str = r#"
SELECT game_id, COUNT(*) AS plays, CAST(MAX(score) AS INTEGER) AS best_score FROM scores
GROUP BY game_id
ORDER BY game_id
"#;

/// Score ledger backed by a SQLite file.
#[derive(Clone)]
pub struct SqliteLedger {
    pool: SqlitePool,
}

impl SqliteLedger {
    /// Opens (creating if missing) the database at `url`, e.g. `sqlite://arcade.db`.
    pub async fn connect(url: &str, max_connections: u32) -> LedgerResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Connected to score ledger at {}", url);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ScoreLedger for SqliteLedger {
    async fn init(&self) -> LedgerResult<()> {
        sqlx::query(CREATE_SCORES_TABLE).execute(&self.pool).await?;
        debug!("scores table ready");
        Ok(())
    }

    async fn append(&self, score: &NewScore) -> LedgerResult<i64> {
        let result = sqlx::query(INSERT_SCORE)
            .bind(&score.game_id)
            .bind(&score.player_name)
            .bind(score.score)
            .bind(&score.ip_address)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(
            "Recorded score {} for {} on {} (id {})",
            score.score, score.player_name, score.game_id, id
        );
        Ok(id)
    }

    async fn top_scores_for_game(&self, game_id: &str, limit: u32) -> LedgerResult<Vec<GameScore>> {
        let rows = sqlx::query_as::<_, GameScore>(TOP_SCORES_FOR_GAME)
            .bind(game_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn global_top_scores_public(&self, limit: u32) -> LedgerResult<Vec<PublicScore>> {
        let rows = sqlx::query_as::<_, PublicScore>(GLOBAL_TOP_SCORES_PUBLIC)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn global_top_scores_admin(&self, limit: u32) -> LedgerResult<Vec<AdminScore>> {
        let rows = sqlx::query_as::<_, AdminScore>(GLOBAL_TOP_SCORES_ADMIN)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn game_stats(&self) -> LedgerResult<Vec<GameStats>> {
        let rows = sqlx::query_as::<_, GameStats>(GAME_STATS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
