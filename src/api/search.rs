// Catalog track search
use crate::constants::MAX_RESULTS;
use crate::models::{SearchTracksResponse, Track};
use crate::utils::errors::CatalogError;

/// Search the catalog for tracks matching `keyword` starting at `offset`
///
/// Without a token nothing is sent: the call is logged and fails with
/// `NoToken`. At most `MAX_RESULTS` tracks are returned whatever the catalog
/// sends back.
pub async fn search_tracks(
    http: &reqwest::Client,
    api_base: &str,
    token: Option<&str>,
    keyword: &str,
    offset: u32,
) -> Result<Vec<Track>, CatalogError> {
    let Some(token) = token else {
        log::error!("[Search] No token available, skipping search for '{}'", keyword);
        return Err(CatalogError::NoToken);
    };

    let url = format!("{}/search", api_base.trim_end_matches('/'));
    log::debug!("[Search] Searching '{}' at offset {}", keyword, offset);

    let response = http
        .get(&url)
        .query(&[
            ("q", keyword),
            ("type", "track"),
            ("offset", &offset.to_string()),
        ])
        .bearer_auth(token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        log::error!("[Search] Failed to fetch music data: {}", status);
        return Err(CatalogError::SearchFetch(status.to_string()));
    }

    let body: SearchTracksResponse = response.json().await.map_err(|e| {
        log::error!("[Search] Unreadable search response: {}", e);
        CatalogError::SearchFetch(e.to_string())
    })?;

    let mut items = body.tracks.items;
    log::info!(
        "[Search] '{}' offset {}: {} item(s) (total {:?})",
        keyword,
        offset,
        items.len(),
        body.tracks.total
    );
    items.truncate(MAX_RESULTS);
    Ok(items)
}
