use anyhow::{Context, Result};
use axum::http::{HeaderMap, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SESSION_COOKIE: &str = "arcade_session";
const SESSION_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Player name
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

/// Issues and checks the signed session token stored in the `arcade_session` cookie.
///
/// Login is by name only, so the token just vouches that this server handed
/// out the name; it proves nothing about who is behind it.
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl SessionManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn issue(&self, player_name: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: player_name.to_string(),
            exp: (now + Duration::hours(SESSION_HOURS)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .context("Failed to encode session token")
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(self.algorithm);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .context("Failed to decode session token")?;

        Ok(token_data.claims)
    }

    /// Player name from the request's session cookie, if it carries a valid token.
    pub fn player_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        let token = cookie_value(headers, SESSION_COOKIE)?;
        match self.verify(token) {
            Ok(claims) => Some(claims.sub),
            Err(e) => {
                debug!("Ignoring session cookie: {:#}", e);
                None
            }
        }
    }
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_HOURS * 3600
    )
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
