use reqwest::Client;

use crate::{
    error::Result,
    spotify::ensure_success,
    types::{RecommendationParams, RecommendationsResponse, Track},
};

/// Fetches recommended tracks for the given seed and target profile.
///
/// The track list comes back exactly as Spotify ordered it; no paging beyond
/// `params.limit` and no retry on failure.
pub async fn get_recommendations(
    client: &Client,
    api_url: &str,
    token: &str,
    params: &RecommendationParams,
) -> Result<Vec<Track>> {
    let response = client
        .get(format!("{}/recommendations", api_url))
        .bearer_auth(token)
        .query(&params.to_query())
        .send()
        .await?;

    let res = ensure_success(response)
        .await?
        .json::<RecommendationsResponse>()
        .await?;

    Ok(res.tracks)
}
