use std::sync::Arc;

use crate::services::RecommendationEngine;

/// Shared application state
///
/// The engine is immutable once built, so handlers share it without a lock.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    /// Used when a request leaves `top_n` out
    pub default_top_n: usize,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, default_top_n: usize) -> Self {
        Self {
            engine: Arc::new(engine),
            default_top_n,
        }
    }
}
