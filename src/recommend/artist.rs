use crate::{error::Result, spotify::MusicCatalog, types::Artist};

/// Returns the artist named in `text`, if any.
///
/// Runs one artist search for the whole text and takes the top candidate.
/// Search ranks loosely, so the candidate only counts when its name occurs,
/// case-insensitively, inside `text`. No candidate and a rejected candidate
/// both yield `None`.
pub async fn detect_artist(catalog: &dyn MusicCatalog, text: &str) -> Result<Option<Artist>> {
    let candidates = catalog.search_artists(text, 1).await?;

    let haystack = text.to_lowercase();
    Ok(candidates
        .into_iter()
        .next()
        .filter(|artist| haystack.contains(&artist.name.to_lowercase())))
}
