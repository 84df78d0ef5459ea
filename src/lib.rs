//! Mood Radio Library
//!
//! This library turns a free-form text query into a list of Spotify
//! recommendations. A query that names a known artist becomes an "artist
//! radio" request; anything else is classified by sentiment and answered with
//! a mood-seeded request. A side dataset of audio features is loaded once,
//! standardized, and served by track identifier.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by the core components
//! - `management` - Long-lived owned components (feature store, tokens)
//! - `recommend` - Artist detection, mood classification and request routing
//! - `sentiment` - External sentiment classifier capability
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use moodradio::{config, management::FeatureStore};
//!
//! #[tokio::main]
//! async fn main() -> moodradio::Res<()> {
//!     config::load_env().await?;
//!     let store = FeatureStore::new(config::dataset_path());
//!     store.initialize().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod recommend;
pub mod sentiment;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for the command-line layer.
///
/// Core components return [`error::Result`] so callers can match on the
/// concrete failure; the CLI only needs to report it, so errors are boxed
/// here while keeping Send + Sync bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading dataset...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used by the command-line layer for unrecoverable conditions. Library
/// code returns [`error::Error`] instead so the caller decides what is fatal.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a lookup miss or a stale token that
/// could not be refreshed.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
