//! # Recommendation Pipeline
//!
//! Decides, per text query, between two kinds of recommendation request:
//!
//! ```text
//! text ─→ detect_artist ─┬─ Some(artist) ─→ artist radio  (seed_artists)
//!                        └─ None ─→ classify_mood ─→ mood profile (seed_genres + targets)
//! ```
//!
//! The artist check always runs first. Exactly one request is sent to the
//! catalog and its tracks are returned untouched inside a [`Recommendation`]
//! envelope tagged with the path that produced it.
//!
//! [`Recommendation`]: crate::types::Recommendation

mod artist;
mod mood;
mod router;

pub use artist::detect_artist;
pub use mood::{MoodProfile, classify_mood};
pub use router::{Decision, RECOMMENDATION_LIMIT, Recommender};
