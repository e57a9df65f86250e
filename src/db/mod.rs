pub mod snapshot;
pub mod tables;

use std::path::Path;

use crate::{
    config::Config,
    error::BuildError,
    services::{Artifacts, FeatureBuilder},
};

pub use tables::{load_items, load_ratings};

/// Produces the artifacts the engine serves from
///
/// An existing snapshot is loaded as is. Otherwise the artifacts are built from the
/// cleaned tables and, when a snapshot path is configured, persisted there.
pub fn load_or_build(config: &Config) -> Result<Artifacts, BuildError> {
    if let Some(path) = config.snapshot_path.as_deref() {
        if Path::new(path).exists() && !config.build_only {
            return snapshot::load(path);
        }
    }

    tracing::info!(
        items_path = %config.items_path,
        ratings_path = %config.ratings_path,
        "Building model artifacts from tables"
    );

    let items = load_items(&config.items_path)?;
    let ratings = load_ratings(&config.ratings_path)?;
    let artifacts = Artifacts::build(
        items,
        &ratings,
        config.duplicate_ratings,
        &FeatureBuilder::default(),
    )?;

    if let Some(path) = config.snapshot_path.as_deref() {
        snapshot::save(path, &artifacts)?;
    }

    Ok(artifacts)
}
