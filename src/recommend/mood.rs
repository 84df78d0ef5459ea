use crate::{
    error::Result,
    sentiment::SentimentClassifier,
    types::{MoodLabel, RecommendationParams, Seed},
};

/// Collapses the classifier output into a mood.
///
/// A positive label means [`MoodLabel::Energetic`], any other label means
/// [`MoodLabel::Sad`]. The confidence score is not consulted.
pub async fn classify_mood(classifier: &dyn SentimentClassifier, text: &str) -> Result<MoodLabel> {
    let sentiment = classifier.classify(text).await?;
    if sentiment.label.eq_ignore_ascii_case("POSITIVE") {
        Ok(MoodLabel::Energetic)
    } else {
        Ok(MoodLabel::Sad)
    }
}

/// Fixed recommendation target for a mood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodProfile {
    pub genres: &'static [&'static str],
    pub target_energy: f64,
    pub target_valence: f64,
}

impl MoodProfile {
    pub fn for_mood(mood: MoodLabel) -> Self {
        match mood {
            MoodLabel::Energetic => MoodProfile {
                genres: &["pop", "dance"],
                target_energy: 0.8,
                target_valence: 0.9,
            },
            MoodLabel::Sad => MoodProfile {
                genres: &["acoustic", "sad"],
                target_energy: 0.3,
                target_valence: 0.2,
            },
        }
    }

    pub fn params(&self, limit: u32) -> RecommendationParams {
        RecommendationParams {
            seed: Seed::Genres(self.genres.iter().map(|g| g.to_string()).collect()),
            target_energy: Some(self.target_energy),
            target_valence: Some(self.target_valence),
            limit,
        }
    }
}
