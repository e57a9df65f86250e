use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{
    error::BuildError,
    models::{Item, Rating},
};

use super::{
    catalog::Catalog,
    features::{FeatureBuilder, FeatureMatrix},
    interactions::{DuplicatePolicy, InteractionMatrix},
    similarity::SimilarityMatrix,
};

/// Everything the recommendation engine reads, built once and never mutated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifacts {
    pub catalog: Catalog,
    pub interactions: InteractionMatrix,
    pub features: FeatureMatrix,
    pub similarity: SimilarityMatrix,
}

impl Artifacts {
    /// Runs the batch build: pivot ratings, vectorise tags, compute similarities
    pub fn build(
        items: Vec<Item>,
        ratings: &[Rating],
        policy: DuplicatePolicy,
        feature_builder: &FeatureBuilder,
    ) -> Result<Self, BuildError> {
        let start = Instant::now();

        let catalog = Catalog::new(items)?;
        let interactions = InteractionMatrix::build(ratings, policy)?;
        let features = feature_builder.build(catalog.items());
        let similarity = SimilarityMatrix::build(&features);

        let artifacts = Self {
            catalog,
            interactions,
            features,
            similarity,
        };
        artifacts.validate()?;

        tracing::info!(
            items = artifacts.catalog.len(),
            rated_items = artifacts.interactions.n_items(),
            users = artifacts.interactions.n_users(),
            terms = artifacts.features.n_terms(),
            build_time_ms = start.elapsed().as_millis(),
            "Model artifacts built"
        );

        Ok(artifacts)
    }

    /// Checks that all artifacts share the catalog's item identity space
    pub fn validate(&self) -> Result<(), BuildError> {
        let n = self.catalog.len();

        if self.features.n_items() != n {
            return Err(BuildError::Inconsistent(format!(
                "feature matrix has {} rows, catalog has {} items",
                self.features.n_items(),
                n
            )));
        }
        if self
            .features
            .rows
            .iter()
            .any(|row| row.len() != self.features.n_terms())
        {
            return Err(BuildError::Inconsistent(
                "feature rows do not match vocabulary size".to_string(),
            ));
        }
        if self.similarity.size() != n || !self.similarity.is_well_formed() {
            return Err(BuildError::Inconsistent(format!(
                "similarity matrix is not {n} x {n}"
            )));
        }
        if !self.interactions.is_well_formed() {
            return Err(BuildError::Inconsistent(
                "interaction matrix shape does not match its index".to_string(),
            ));
        }
        if let Some(unknown) = self
            .interactions
            .item_ids()
            .iter()
            .find(|id| self.catalog.row_of(**id).is_none())
        {
            return Err(BuildError::Inconsistent(format!(
                "rated item {unknown} is missing from the catalog"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn items() -> Vec<Item> {
        vec![
            Item::new(1, "A", &["Action", "Sci-Fi"]),
            Item::new(2, "B", &["Action"]),
            Item::new(3, "C", &["Comedy"]),
        ]
    }

    #[test]
    fn test_build_produces_consistent_artifacts() {
        let ratings = vec![Rating::new(1, 1, 5.0), Rating::new(1, 2, 4.0)];
        let artifacts = Artifacts::build(
            items(),
            &ratings,
            DuplicatePolicy::LastWins,
            &FeatureBuilder::default(),
        )
        .unwrap();

        assert_eq!(artifacts.catalog.len(), 3);
        assert_eq!(artifacts.features.n_items(), 3);
        assert_eq!(artifacts.similarity.size(), 3);
        // item 3 was never rated
        assert_eq!(artifacts.interactions.row_of(ItemId(3)), None);
    }

    #[test]
    fn test_rating_for_unknown_item_fails() {
        let ratings = vec![Rating::new(1, 99, 5.0)];
        let result = Artifacts::build(
            items(),
            &ratings,
            DuplicatePolicy::LastWins,
            &FeatureBuilder::default(),
        );
        assert!(matches!(result, Err(BuildError::Inconsistent(_))));
    }

    #[test]
    fn test_empty_inputs_fail() {
        let ratings = vec![Rating::new(1, 1, 5.0)];
        let result = Artifacts::build(
            vec![],
            &ratings,
            DuplicatePolicy::LastWins,
            &FeatureBuilder::default(),
        );
        assert!(matches!(result, Err(BuildError::EmptyCatalog)));

        let result = Artifacts::build(
            items(),
            &[],
            DuplicatePolicy::LastWins,
            &FeatureBuilder::default(),
        );
        assert!(matches!(result, Err(BuildError::EmptyRatings)));
    }
}
