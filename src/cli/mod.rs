//! # CLI Module
//!
//! Command implementations behind the `moodradio` binary. Each command wires
//! the core components together from configuration, runs them once and
//! presents the result on the console.
//!
//! ## Commands
//!
//! - [`recommend`] - Runs the recommendation pipeline for a text query
//! - [`features`] - Looks up the standardized audio features of a track
//! - [`dataset`] - Loads the feature dataset and reports what was fitted
//! - [`auth`] - Seeds the token cache from a refresh token
//!
//! ## Usage Patterns
//!
//! ```bash
//! moodradio auth --refresh-token AQD...          # Seed the token cache
//! moodradio recommend "play some Adele songs"    # Artist radio
//! moodradio recommend "I feel great today"       # Mood based
//! moodradio recommend "rainy sunday" --json      # Raw response envelope
//! moodradio features 5SuOikwiRyPMVoIQDJUgSV      # Feature lookup
//! moodradio dataset                              # Dataset summary
//! ```
//!
//! ## Error Handling
//!
//! Core errors are matched here and turned into console output. Conditions
//! the user has to fix (missing token, missing dataset) end the process via
//! the `error!` macro.

mod auth;
mod features;
mod recommend;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use features::dataset;
pub use features::features;
pub use recommend::recommend;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
