use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppResult, RecommendError},
    middleware::request_id::RequestId,
    models::{ItemMatch, RecommendationRequest, Recommendations, Strategy},
    services::{parse_top_n, resolve_title},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Shows which catalog item a title query resolves to
pub async fn search_items(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ItemMatch>> {
    let catalog = &state.engine.artifacts().catalog;
    let resolution = resolve_title(catalog, &params.q)?;

    Ok(Json(ItemMatch {
        item: catalog.item(resolution.row).clone(),
        match_count: resolution.match_count,
    }))
}

/// Item-item collaborative filtering recommendations
pub async fn recommend_collaborative(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Recommendations>> {
    recommend(&state, &request_id, Strategy::Collaborative, payload)
}

/// Genre-similarity content-based recommendations
pub async fn recommend_content(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Recommendations>> {
    recommend(&state, &request_id, Strategy::Content, payload)
}

fn recommend(
    state: &AppState,
    request_id: &RequestId,
    strategy: Strategy,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Recommendations>> {
    // a non-integer top_n fails here, before any lookup
    let Json(request) =
        payload.map_err(|rejection| RecommendError::InvalidArgument(rejection.body_text()))?;

    tracing::info!(
        request_id = %request_id,
        strategy = %strategy,
        title = %request.title,
        top_n = ?request.top_n,
        "Processing recommendation request"
    );

    let top_n = parse_top_n(request.top_n, state.default_top_n)?;
    let result = state
        .engine
        .recommend(strategy, &request.title, top_n)
        .inspect_err(|e| {
            tracing::info!(request_id = %request_id, error = %e, "Recommendation request rejected");
        })?;

    tracing::info!(
        request_id = %request_id,
        resolved_title = %result.resolved_title,
        match_count = result.match_count,
        returned = result.recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(result))
}
