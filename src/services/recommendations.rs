use std::cmp::Ordering;

use crate::{
    error::{BuildError, RecommendError},
    models::{Recommendations, Strategy},
};

use super::{
    artifacts::Artifacts,
    neighbors::{BruteForceIndex, NeighborIndex},
    title_search::resolve_title,
};

/// Validates a caller-supplied recommendation count
///
/// A missing value falls back to `default`; zero and negative counts are rejected.
pub fn parse_top_n(top_n: Option<i64>, default: usize) -> Result<usize, RecommendError> {
    match top_n {
        None => Ok(default),
        Some(n) if n >= 1 => usize::try_from(n)
            .map_err(|_| RecommendError::InvalidArgument(format!("top_n is too large: {n}"))),
        Some(n) => Err(RecommendError::InvalidArgument(format!(
            "top_n must be at least 1, got {n}"
        ))),
    }
}

/// Answers title queries with collaborative or content-based recommendations
///
/// Holds read-only artifacts only, so one engine can be shared across request
/// handlers without locking.
pub struct RecommendationEngine {
    artifacts: Artifacts,
    neighbors: Box<dyn NeighborIndex>,
}

impl RecommendationEngine {
    /// Creates an engine with an exact brute-force neighbour index
    pub fn new(artifacts: Artifacts) -> Result<Self, BuildError> {
        let neighbors = Box::new(BruteForceIndex::new(&artifacts.interactions));
        Self::with_index(artifacts, neighbors)
    }

    /// Creates an engine over a caller-provided neighbour index
    ///
    /// The index must cover the interaction matrix rows one to one.
    pub fn with_index(
        artifacts: Artifacts,
        neighbors: Box<dyn NeighborIndex>,
    ) -> Result<Self, BuildError> {
        artifacts.validate()?;
        if neighbors.len() != artifacts.interactions.n_items() {
            return Err(BuildError::Inconsistent(format!(
                "neighbour index has {} rows, interaction matrix has {}",
                neighbors.len(),
                artifacts.interactions.n_items()
            )));
        }
        Ok(Self {
            artifacts,
            neighbors,
        })
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Item-item collaborative filtering over co-rating patterns
    ///
    /// Asks the neighbour index for `top_n + 1` rows since the query item is its
    /// own nearest neighbour, then drops the query item by identity and returns the
    /// rest in ascending-distance order.
    pub fn recommend_collaborative(
        &self,
        query: &str,
        top_n: usize,
    ) -> Result<Recommendations, RecommendError> {
        check_top_n(top_n)?;
        let catalog = &self.artifacts.catalog;
        let interactions = &self.artifacts.interactions;

        let resolution = resolve_title(catalog, query)?;
        let item = catalog.item(resolution.row);
        let row = interactions
            .row_of(item.id)
            .ok_or(RecommendError::NotIndexed(item.id))?;

        let recommendations: Vec<String> = self
            .neighbors
            .k_nearest(row, top_n.saturating_add(1))
            .into_iter()
            .filter(|hit| hit.row != row)
            .take(top_n)
            .filter_map(|hit| catalog.get(interactions.item_at(hit.row)))
            .map(|item| item.title.clone())
            .collect();

        tracing::debug!(
            resolved = %item.title,
            item_id = %item.id,
            returned = recommendations.len(),
            "Collaborative recommendations computed"
        );

        Ok(Recommendations {
            resolved_title: item.title.clone(),
            match_count: resolution.match_count,
            strategy: Strategy::Collaborative,
            recommendations,
        })
    }

    /// Content-based filtering over precomputed tag similarity
    ///
    /// Every other catalog item is ranked by descending similarity to the query
    /// item. The sort is stable, so equal scores keep catalog order.
    pub fn recommend_content(
        &self,
        query: &str,
        top_n: usize,
    ) -> Result<Recommendations, RecommendError> {
        check_top_n(top_n)?;
        let catalog = &self.artifacts.catalog;

        let resolution = resolve_title(catalog, query)?;
        let row = resolution.row;
        let scores = self.artifacts.similarity.row(row);

        let mut ranked: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(other, _)| *other != row)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let recommendations: Vec<String> = ranked
            .into_iter()
            .take(top_n)
            .map(|(other, _)| catalog.item(other).title.clone())
            .collect();

        let item = catalog.item(row);
        tracing::debug!(
            resolved = %item.title,
            item_id = %item.id,
            returned = recommendations.len(),
            "Content recommendations computed"
        );

        Ok(Recommendations {
            resolved_title: item.title.clone(),
            match_count: resolution.match_count,
            strategy: Strategy::Content,
            recommendations,
        })
    }

    /// Dispatches to the strategy named by `strategy`
    pub fn recommend(
        &self,
        strategy: Strategy,
        query: &str,
        top_n: usize,
    ) -> Result<Recommendations, RecommendError> {
        match strategy {
            Strategy::Collaborative => self.recommend_collaborative(query, top_n),
            Strategy::Content => self.recommend_content(query, top_n),
        }
    }
}

fn check_top_n(top_n: usize) -> Result<(), RecommendError> {
    if top_n == 0 {
        return Err(RecommendError::InvalidArgument(
            "top_n must be at least 1, got 0".to_string(),
        ));
    }
    Ok(())
}
