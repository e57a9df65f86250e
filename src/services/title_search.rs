use crate::{error::RecommendError, models::Item};

use super::catalog::Catalog;

/// A query resolved to a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Catalog row of the first matching title
    pub row: usize,
    /// Total number of titles containing the query
    pub match_count: usize,
}

/// Maps a free-text query to the first catalog title containing it
///
/// The query is trimmed and lower-cased, then matched as a plain substring of each
/// lower-cased title, in catalog order. Every match is counted so callers can tell
/// when a query was ambiguous, but only the first one is used.
pub fn resolve_title(catalog: &Catalog, query: &str) -> Result<Resolution, RecommendError> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(RecommendError::InvalidArgument(
            "title query must not be empty".to_string(),
        ));
    }

    let mut matches = catalog
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| title_contains(item, &needle))
        .map(|(row, _)| row);

    let row = matches
        .next()
        .ok_or_else(|| RecommendError::NotFound(query.trim().to_string()))?;
    let match_count = 1 + matches.count();

    if match_count > 1 {
        tracing::debug!(
            query = %needle,
            match_count,
            resolved = %catalog.item(row).title,
            "Ambiguous title query, using first match"
        );
    }

    Ok(Resolution { row, match_count })
}

fn title_contains(item: &Item, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
}
