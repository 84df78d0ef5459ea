//! # Spotify Integration Module
//!
//! This module is the music catalog collaborator of Mood Radio. It wraps the
//! handful of Spotify Web API endpoints the recommendation pipeline needs and
//! exposes them through the [`MusicCatalog`] trait, so the pipeline can be
//! exercised against an in-memory catalog in tests.
//!
//! ## Architecture
//!
//! ```text
//! Recommendation Router
//!          ↓
//! MusicCatalog (trait)
//!          ↓
//! SpotifyClient ── TokenManager (cached token, refresh)
//!     ├── search            GET /search?type=artist
//!     └── recommendations   GET /recommendations
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! A response with a non-success status becomes
//! [`Error::Upstream`](crate::error::Error::Upstream) carrying the status code
//! and the response body. Transport failures surface as
//! [`Error::Http`](crate::error::Error::Http). Nothing is retried here; retry
//! policy, if any, belongs to the caller.
//!
//! ## Authentication
//!
//! Every call asks the shared [`TokenManager`] for a valid access token. The
//! manager refreshes the token through [`auth::refresh_token`] shortly before
//! it expires. Obtaining the first token (the authorization-code login) is
//! outside this crate; `moodradio auth` only seeds the cache from a refresh
//! token.

pub mod auth;
pub mod recommendations;
pub mod search;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    management::TokenManager,
    types::{Artist, RecommendationParams, Track},
};

/// Read access to a music catalog.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Searches artists matching `query`, returning at most `limit` candidates.
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>>;

    /// Fetches one page of recommended tracks.
    async fn recommendations(&self, params: &RecommendationParams) -> Result<Vec<Track>>;
}

/// [`MusicCatalog`] backed by the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Arc<Mutex<TokenManager>>,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            tokens: Arc::new(Mutex::new(tokens)),
        }
    }

    /// Builds a client from configuration and the cached token.
    pub async fn from_config() -> Result<Self> {
        let tokens = TokenManager::load().await?;
        Ok(Self::new(config::spotify_apiurl(), tokens))
    }

    async fn access_token(&self) -> String {
        self.tokens.lock().await.get_valid_token().await
    }
}

#[async_trait]
impl MusicCatalog for SpotifyClient {
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>> {
        let token = self.access_token().await;
        search::search_artists(&self.http, &self.api_url, &token, query, limit).await
    }

    async fn recommendations(&self, params: &RecommendationParams) -> Result<Vec<Track>> {
        let token = self.access_token().await;
        recommendations::get_recommendations(&self.http, &self.api_url, &token, params).await
    }
}

/// Passes a successful response through, turns anything else into [`Error::Upstream`].
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Upstream {
        status: status.as_u16(),
        body,
    })
}
