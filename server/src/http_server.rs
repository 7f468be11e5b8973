use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{auth, games, scores};
use crate::api::session::SessionManager;
use crate::config::ArcadeConfig;
use crate::db::ScoreLedger;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Score ledger
    pub ledger: Arc<dyn ScoreLedger>,
    /// Session token issuer/verifier
    pub sessions: Arc<SessionManager>,
    /// Directory whose subdirectories are the playable games
    pub games_dir: Arc<PathBuf>,
    /// Directory holding the portal pages
    pub web_dir: Arc<PathBuf>,
    /// Whether proxy headers name the submitter address
    pub trust_proxy_headers: bool,
}

impl AppState {
    pub fn new(ledger: Arc<dyn ScoreLedger>, config: &ArcadeConfig) -> Self {
        Self {
            ledger,
            sessions: Arc::new(SessionManager::new(&config.session_secret)),
            games_dir: Arc::new(config.games_dir.clone()),
            web_dir: Arc::new(config.web_dir.clone()),
            trust_proxy_headers: config.trust_proxy_headers,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/me", get(auth::me))
        .route("/api/games", get(games::list_games))
        .route("/api/score", post(scores::submit_score))
        .route("/api/top_scores/:game_id", get(scores::top_scores))
        .route("/api/scores", get(scores::public_scores))
        .route("/api/admin/scores", get(scores::admin_scores))
        .route("/api/stats", get(scores::game_stats));

    let page_routes = Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/home", get(auth::home_page))
        .route("/scores", get(auth::scores_page))
        .route("/admin_scores", get(auth::admin_scores_page));

    let game_routes = Router::new()
        .route("/game/*path", get(games::game_route));

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .merge(game_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve the portal until `cancellation_token` fires
pub async fn run_http_server(
    addr: &str,
    state: AppState,
    cancellation_token: CancellationToken,
) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    run_http_server_with_listener(listener, state, cancellation_token).await
}

pub async fn run_http_server_with_listener(
    listener: TcpListener,
    state: AppState,
    cancellation_token: CancellationToken,
) -> Result<()> {
    let app = build_router(state);
    info!("Arcade HTTP server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        cancellation_token.cancelled().await;
        info!("HTTP server received shutdown signal");
    })
    .await
    .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))
}

async fn health_check() -> &'static str {
    "OK"
}
