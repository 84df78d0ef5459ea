use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config,
    error::{Error, Result},
    spotify::ensure_success,
    types::Token,
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    expires_in: Option<u64>,
}

/// Exchanges a refresh token for a fresh access token.
///
/// Authenticates against the token endpoint with HTTP Basic credentials built
/// from the configured client id and secret. Spotify does not always rotate
/// the refresh token; when the response omits it the one passed in is kept.
///
/// # Errors
///
/// - [`Error::Upstream`] when the token endpoint rejects the request
/// - [`Error::Http`] on transport or decoding failures
/// - [`Error::Token`] when the response carries an empty access token
pub async fn refresh_token(refresh_token: &str) -> Result<Token> {
    let credentials = STANDARD.encode(format!(
        "{}:{}",
        config::spotify_client_id(),
        config::spotify_client_secret()
    ));

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .header("Authorization", format!("Basic {}", credentials))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    let json: TokenResponse = ensure_success(res).await?.json().await?;
    if json.access_token.is_empty() {
        return Err(Error::Token("token endpoint returned an empty access token".into()));
    }

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json
            .refresh_token
            .unwrap_or_else(|| refresh_token.to_string()),
        scope: json.scope,
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
