use axum::{
    Json,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use arcade_common::{GameCatalogEntry, is_valid_game_id};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::warn;

use super::error::ApiError;
use super::serve_file;
use crate::catalog;
use crate::http_server::AppState;

pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<GameCatalogEntry>>, ApiError> {
    let games = catalog::list_games(&state.games_dir).await?;
    Ok(Json(games))
}

/// Everything below `/game/`.
///
/// - `/game/{id}` redirects to `/game/{id}/` so relative asset URLs resolve
/// - `/game/{id}/` serves the game's `index.html` to players with a session
/// - `/game/{id}/{file}` serves any other file of the game
pub async fn game_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(path): Path<String>,
    request: Request,
) -> Response {
    let (game_id, file) = match path.split_once('/') {
        Some((game_id, file)) => (game_id, Some(file)),
        None => (path.as_str(), None),
    };
    if !is_valid_game_id(game_id) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match file {
        None => {
            let location = format!("{}/", request.uri().path());
            Redirect::permanent(&location).into_response()
        }
        Some("") => play_game(&state, &headers, game_id).await,
        Some(_) => serve_game_file(&state, game_id, request).await,
    }
}

async fn play_game(state: &AppState, headers: &HeaderMap, game_id: &str) -> Response {
    if state.sessions.player_from_headers(headers).is_none() {
        return Redirect::to("/login").into_response();
    }
    serve_file(state.games_dir.join(game_id).join("index.html")).await
}

async fn serve_game_file(state: &AppState, game_id: &str, mut request: Request) -> Response {
    // Keep the still percent-encoded tail of the original path; ServeDir
    // decodes it and refuses anything escaping the game directory.
    let tail = request
        .uri()
        .path()
        .strip_prefix("/game/")
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, tail)| format!("/{tail}"))
        .unwrap_or_else(|| "/".to_string());

    match tail.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(e) => {
            warn!("Rejecting game asset path {:?}: {}", tail, e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    }

    let service = ServeDir::new(state.games_dir.join(game_id));
    match service.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
