pub mod artifacts;
pub mod catalog;
pub mod features;
pub mod interactions;
pub mod neighbors;
pub mod recommendations;
pub mod similarity;
pub mod title_search;

pub use artifacts::Artifacts;
pub use catalog::Catalog;
pub use features::{FeatureBuilder, FeatureMatrix};
pub use interactions::{DuplicatePolicy, InteractionMatrix};
pub use neighbors::{BruteForceIndex, Neighbor, NeighborIndex};
pub use recommendations::{parse_top_n, RecommendationEngine};
pub use similarity::SimilarityMatrix;
pub use title_search::{resolve_title, Resolution};
