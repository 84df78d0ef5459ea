use reqwest::Client;

use crate::{
    error::Result,
    spotify::ensure_success,
    types::{Artist, SearchArtistsResponse},
};

/// Searches the catalog for artists matching `query`.
///
/// Issues exactly one `GET /search?type=artist` request; the caller decides
/// what to make of the candidates.
pub async fn search_artists(
    client: &Client,
    api_url: &str,
    token: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<Artist>> {
    let limit = limit.to_string();
    let response = client
        .get(format!("{}/search", api_url))
        .bearer_auth(token)
        .query(&[("q", query), ("type", "artist"), ("limit", limit.as_str())])
        .send()
        .await?;

    let res = ensure_success(response)
        .await?
        .json::<SearchArtistsResponse>()
        .await?;

    Ok(res.artists.items)
}
