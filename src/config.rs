//! Configuration management for Mood Radio.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage Spotify API
//! credentials, the audio-feature dataset location and the sentiment service
//! endpoint.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `moodradio/.env` inside the platform-specific
/// local data directory:
/// - Linux: `~/.local/share/moodradio/.env`
/// - macOS: `~/Library/Application Support/moodradio/.env`
/// - Windows: `%LOCALAPPDATA%/moodradio/.env`
///
/// Variables already present in the process environment are not overwritten.
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

/// Returns the application directory inside the local data directory.
///
/// Falls back to the current working directory when the platform does not
/// expose a local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodradio");
    path
}

/// Returns the location of the audio-feature CSV dataset.
///
/// Reads `MOODRADIO_DATASET_PATH` and falls back to `dataset.csv` inside
/// [`data_dir`]. The file is not checked here; a missing file surfaces as
/// [`crate::error::Error::DatasetNotFound`] when the feature store loads.
pub fn dataset_path() -> PathBuf {
    match env::var("MOODRADIO_DATASET_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => data_dir().join("dataset.csv"),
    }
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// The secret is only sent to the token endpoint as HTTP Basic credentials
/// and should never be exposed in logs or version control.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").expect("SPOTIFY_API_AUTH_CLIENT_SECRET must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token endpoint used for refreshing tokens.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the endpoint of the hosted sentiment classifier.
///
/// # Panics
///
/// Panics if the `SENTIMENT_API_URL` environment variable is not set.
pub fn sentiment_api_url() -> String {
    env::var("SENTIMENT_API_URL").expect("SENTIMENT_API_URL must be set")
}

/// Returns the bearer token for the sentiment classifier, if one is configured.
pub fn sentiment_api_token() -> Option<String> {
    env::var("SENTIMENT_API_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty())
}
