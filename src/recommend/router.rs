use std::sync::Arc;

use crate::{
    error::Result,
    recommend::{MoodProfile, classify_mood, detect_artist},
    sentiment::SentimentClassifier,
    spotify::MusicCatalog,
    types::{MoodLabel, RecommendRequest, Recommendation, RecommendationParams, Seed},
};

pub const RECOMMENDATION_LIMIT: u32 = 50;

/// Which recommendation path a query takes.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    ArtistRadio {
        artist_id: String,
        artist_name: String,
    },
    Mood(MoodLabel),
}

impl Decision {
    pub fn params(&self) -> RecommendationParams {
        match self {
            Decision::ArtistRadio { artist_id, .. } => RecommendationParams {
                seed: Seed::Artist(artist_id.clone()),
                target_energy: None,
                target_valence: None,
                limit: RECOMMENDATION_LIMIT,
            },
            Decision::Mood(mood) => MoodProfile::for_mood(*mood).params(RECOMMENDATION_LIMIT),
        }
    }
}

/// Routes text queries to artist radio or mood recommendations.
///
/// Holds the two external capabilities it depends on; both are built once at
/// startup and can be swapped for fakes.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<dyn MusicCatalog>,
    classifier: Arc<dyn SentimentClassifier>,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn MusicCatalog>, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            catalog,
            classifier,
        }
    }

    /// Picks the path for `text`: artist detection first, then mood.
    ///
    /// A classifier failure is returned as is. There is no fallback mood.
    pub async fn decide(&self, text: &str) -> Result<Decision> {
        if let Some(artist) = detect_artist(self.catalog.as_ref(), text).await? {
            return Ok(Decision::ArtistRadio {
                artist_id: artist.id,
                artist_name: artist.name,
            });
        }

        let mood = classify_mood(self.classifier.as_ref(), text).await?;
        Ok(Decision::Mood(mood))
    }

    /// Decides the path for `text` and fetches its recommendations once.
    pub async fn recommend(&self, text: &str) -> Result<Recommendation> {
        let decision = self.decide(text).await?;
        let tracks = self.catalog.recommendations(&decision.params()).await?;

        Ok(match decision {
            Decision::ArtistRadio { artist_name, .. } => Recommendation::ArtistRadio {
                artist: artist_name,
                tracks,
            },
            Decision::Mood(mood) => Recommendation::Mood { mood, tracks },
        })
    }

    pub async fn handle(&self, request: &RecommendRequest) -> Result<Recommendation> {
        self.recommend(&request.text).await
    }
}
