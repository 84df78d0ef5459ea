use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<Artist>,
    pub total: Option<u64>,
}

/// A track exactly as the recommendations endpoint returned it.
///
/// The upstream object is kept whole, nulls and unknown fields included, so
/// it serializes back out unchanged. Accessors read the few fields the
/// console output needs and tolerate their absence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Track(pub Value);

impl Track {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn uri(&self) -> Option<&str> {
        self.0.get("uri").and_then(Value::as_str)
    }

    pub fn artist_names(&self) -> Vec<String> {
        self.0
            .get("artists")
            .and_then(Value::as_array)
            .map(|artists| {
                artists
                    .iter()
                    .filter_map(|a| a.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn album_name(&self) -> Option<&str> {
        self.0
            .get("album")
            .and_then(|album| album.get("name"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

/// Raw output of the sentiment classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Energetic,
    Sad,
}

impl MoodLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Energetic => "energetic",
            MoodLabel::Sad => "sad",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub text: String,
}

/// Response envelope of a recommendation request.
///
/// Serializes as `{"source": "artist_radio", "artist": .., "tracks": [..]}`
/// or `{"source": "mood", "mood": .., "tracks": [..]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Recommendation {
    ArtistRadio { artist: String, tracks: Vec<Track> },
    Mood { mood: MoodLabel, tracks: Vec<Track> },
}

impl Recommendation {
    pub fn source(&self) -> &'static str {
        match self {
            Recommendation::ArtistRadio { .. } => "artist_radio",
            Recommendation::Mood { .. } => "mood",
        }
    }

    pub fn tracks(&self) -> &[Track] {
        match self {
            Recommendation::ArtistRadio { tracks, .. } => tracks,
            Recommendation::Mood { tracks, .. } => tracks,
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct FeatureTableRow {
    pub feature: String,
    pub value: String,
}

#[derive(Tabled)]
pub struct ScalerTableRow {
    pub feature: String,
    pub mean: String,
    pub std: String,
}

/// What a recommendation request is anchored on.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    Artist(String),
    Genres(Vec<String>),
}

/// Parameters of a single call to the recommendations endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationParams {
    pub seed: Seed,
    pub target_energy: Option<f64>,
    pub target_valence: Option<f64>,
    pub limit: u32,
}

impl RecommendationParams {
    /// Encodes the parameters as query pairs for `GET /recommendations`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = match &self.seed {
            Seed::Artist(id) => vec![("seed_artists", id.clone())],
            Seed::Genres(genres) => vec![("seed_genres", genres.join(","))],
        };
        if let Some(energy) = self.target_energy {
            query.push(("target_energy", energy.to_string()));
        }
        if let Some(valence) = self.target_valence {
            query.push(("target_valence", valence.to_string()));
        }
        query.push(("limit", self.limit.to_string()));
        query
    }
}
