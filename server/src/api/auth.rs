use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ApiError;
use super::serve_file;
use super::session::{expired_session_cookie, session_cookie};
use crate::http_server::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub username: Option<String>,
}

/// `/` sends players with a session to the home page, everyone else to login.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if state.sessions.player_from_headers(&headers).is_some() {
        Redirect::to("/home")
    } else {
        Redirect::to("/login")
    }
}

pub async fn login_page(State(state): State<AppState>) -> Response {
    serve_file(state.web_dir.join("login.html")).await
}

/// Name-only login. A blank name just shows the login page again.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let username = form.username.trim();
    if username.is_empty() {
        return Ok(serve_file(state.web_dir.join("login.html")).await);
    }

    let token = state.sessions.issue(username)?;
    info!("Player logged in: {}", username);

    Ok((
        [(header::SET_COOKIE, session_cookie(&token))],
        Redirect::to("/home"),
    )
        .into_response())
}

pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Json<MeResponse> {
    Json(MeResponse {
        username: state.sessions.player_from_headers(&headers),
    })
}

pub async fn home_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.sessions.player_from_headers(&headers).is_none() {
        return Redirect::to("/login").into_response();
    }
    serve_file(state.web_dir.join("home.html")).await
}

pub async fn scores_page(State(state): State<AppState>) -> Response {
    serve_file(state.web_dir.join("scores.html")).await
}

pub async fn admin_scores_page(State(state): State<AppState>) -> Response {
    serve_file(state.web_dir.join("admin_scores.html")).await
}
