use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::ItemId;

/// Failures of a single recommendation request
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error("Movie title not found: {0}")]
    NotFound(String),

    #[error("Item {0} is not in the collaborative model")]
    NotIndexed(ItemId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures while building or loading the model artifacts
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("Duplicate item id {0} in catalog")]
    DuplicateItem(ItemId),

    #[error("Ratings table is empty")]
    EmptyRatings,

    #[error("Malformed row {row} in {table}: {message}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        message: String,
    },

    #[error("Inconsistent artifacts: {0}")]
    Inconsistent(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error("Model build error: {0}")]
    Build(#[from] BuildError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Recommend(RecommendError::NotFound(_))
            | AppError::Recommend(RecommendError::NotIndexed(_)) => StatusCode::NOT_FOUND,
            AppError::Recommend(RecommendError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            AppError::Build(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::from(RecommendError::NotFound("zzz".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_indexed_maps_to_404() {
        let response = AppError::from(RecommendError::NotIndexed(ItemId(7))).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_argument_maps_to_400() {
        let response =
            AppError::from(RecommendError::InvalidArgument("top_n".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_recommend_error_message_is_transparent() {
        let error = AppError::from(RecommendError::NotIndexed(ItemId(1682)));
        assert_eq!(error.to_string(), "Item 1682 is not in the collaborative model");
    }
}
