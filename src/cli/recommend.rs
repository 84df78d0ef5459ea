use std::sync::Arc;

use tabled::Table;

use crate::{
    cli::spinner,
    error,
    error::Error,
    info,
    recommend::Recommender,
    sentiment::HttpSentimentClassifier,
    spotify::SpotifyClient,
    success,
    types::{Recommendation, TrackTableRow},
    warning,
};

pub async fn recommend(text: String, json: bool) {
    let catalog = match SpotifyClient::from_config().await {
        Ok(c) => c,
        Err(e) => error!("Failed to load token. Please run moodradio auth\n Error: {}", e),
    };
    let classifier = HttpSentimentClassifier::from_config();
    let recommender = Recommender::new(Arc::new(catalog), Arc::new(classifier));

    let pb = spinner("Fetching recommendations...");
    let result = recommender.recommend(&text).await;
    pb.finish_and_clear();

    let recommendation = match result {
        Ok(r) => r,
        Err(Error::ClassificationUnavailable(reason)) => {
            error!("Could not determine the mood of the query: {}", reason)
        }
        Err(Error::Upstream { status, body }) => {
            error!("Spotify API error {}: {}", status, body)
        }
        Err(e) => error!("Failed to fetch recommendations: {}", e),
    };

    if json {
        match serde_json::to_string_pretty(&recommendation) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Failed to serialize recommendations: {}", e),
        }
        return;
    }

    match &recommendation {
        Recommendation::ArtistRadio { artist, .. } => info!("Artist radio for {}", artist),
        Recommendation::Mood { mood, .. } => info!("Recommendations for a {} mood", mood.as_str()),
    }

    let tracks = recommendation.tracks();
    if tracks.is_empty() {
        warning!("Spotify returned no tracks.");
        return;
    }

    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name().unwrap_or_default().to_string(),
            artists: t.artist_names().join(", "),
            album: t.album_name().unwrap_or_default().to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    success!("{} tracks recommended.", tracks.len());
}
