use axum::{
    Json,
    extract::{ConnectInfo, Path, Query, State, rejection::JsonRejection},
    http::HeaderMap,
};
use chrono::NaiveDateTime;
use arcade_common::{ANONYMOUS_PLAYER, RawSubmission, SubmissionError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::{debug, info};

use super::error::ApiError;
use crate::db::models::{AdminScore, GameStats, NewScore, PublicScore, serialize_store_timestamp};
use crate::http_server::AppState;

const GAME_TOP_SCORES_LIMIT: u32 = 10;
const DEFAULT_LISTING_LIMIT: u32 = 100;
const MAX_LISTING_LIMIT: u32 = 1000;

/// Query parameters for the global listings
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    /// Number of entries to return (default: 100, max: 1000)
    pub limit: Option<u32>,
}

impl ListingQuery {
    fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_LISTING_LIMIT)
            .clamp(1, MAX_LISTING_LIMIT)
    }
}

/// Row of the per-game leaderboard as game pages consume it
#[derive(Debug, Serialize)]
pub struct TopScore {
    pub player: String,
    pub score: i64,
    #[serde(serialize_with = "serialize_store_timestamp")]
    pub date: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}

/// Record a score for the current player.
///
/// Body: `{"game_id": string, "score": integer}`. Players without a session are
/// recorded as `Anonymous`. Nothing is written when either field is missing.
pub async fn submit_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(raw) = payload.map_err(|rejection| {
        debug!("Unreadable score payload: {}", rejection);
        SubmissionError::NoData
    })?;
    let submission = raw.validate()?;

    let player_name = state
        .sessions
        .player_from_headers(&headers)
        .unwrap_or_else(|| ANONYMOUS_PLAYER.to_string());
    let ip_address = client_ip(
        &headers,
        connect_info.map(|ConnectInfo(addr)| addr),
        state.trust_proxy_headers,
    );

    let id = state
        .ledger
        .append(&NewScore {
            game_id: submission.game_id,
            player_name,
            score: submission.score,
            ip_address,
        })
        .await?;

    info!("Score {} saved as entry {}", submission.score, id);
    Ok(Json(SubmitResponse { success: true }))
}

/// Top ten scores of one game, without origin data.
pub async fn top_scores(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<TopScore>>, ApiError> {
    let rows = state
        .ledger
        .top_scores_for_game(&game_id, GAME_TOP_SCORES_LIMIT)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| TopScore {
                player: row.player_name,
                score: row.score,
                date: row.timestamp,
            })
            .collect(),
    ))
}

pub async fn public_scores(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<PublicScore>>, ApiError> {
    let rows = state.ledger.global_top_scores_public(query.limit()).await?;
    Ok(Json(rows))
}

/// Global listing including each submitter's address. The only route that
/// exposes `ip_address`.
pub async fn admin_scores(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<AdminScore>>, ApiError> {
    let rows = state.ledger.global_top_scores_admin(query.limit()).await?;
    Ok(Json(rows))
}

pub async fn game_stats(State(state): State<AppState>) -> Result<Json<Vec<GameStats>>, ApiError> {
    let rows = state.ledger.game_stats().await?;
    Ok(Json(rows))
}

/// Extracts the submitter address.
///
/// Any client can send `X-Forwarded-For`/`X-Real-IP`, so they are only read when
/// `trust_proxy_headers` is set, i.e. when the portal sits behind a proxy that
/// overwrites them. Otherwise the socket peer is recorded.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy_headers: bool) -> Option<String> {
    if !trust_proxy_headers {
        return peer.map(|addr| addr.ip().to_string());
    }

    // Take the first IP in a X-Forwarded-For chain
    if let Some(forwarded_for) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(ip) = forwarded_for.split(',').next().map(str::trim).filter(|ip| !ip.is_empty()) {
            return Some(ip.to_string());
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return Some(real_ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}
