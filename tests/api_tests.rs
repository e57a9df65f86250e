use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;

use movie_rec_api::api::{create_router, AppState};
use movie_rec_api::models::{Item, Rating};
use movie_rec_api::services::{Artifacts, DuplicatePolicy, FeatureBuilder, RecommendationEngine};

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn create_test_server() -> TestServer {
    let items = vec![
        Item::new(1, "Star Wars (1977)", &["Action", "Adventure", "Sci-Fi"]),
        Item::new(2, "Return of the Jedi (1983)", &["Action", "Adventure", "Sci-Fi"]),
        Item::new(3, "The Matrix (1999)", &["Action", "Sci-Fi"]),
        Item::new(4, "Clueless (1995)", &["Comedy", "Romance"]),
        Item::new(5, "Star Trek: Generations (1994)", &["Action", "Sci-Fi"]),
    ];
    let ratings = vec![
        Rating::new(1, 1, 5.0),
        Rating::new(2, 1, 4.0),
        Rating::new(3, 1, 1.0),
        Rating::new(1, 2, 5.0),
        Rating::new(2, 2, 4.0),
        Rating::new(3, 2, 1.0),
        Rating::new(1, 3, 4.0),
        Rating::new(3, 3, 2.0),
        Rating::new(1, 4, 1.0),
        Rating::new(3, 4, 5.0),
    ];
    let artifacts = Artifacts::build(
        items,
        &ratings,
        DuplicatePolicy::LastWins,
        &FeatureBuilder::default(),
    )
    .unwrap();
    let engine = RecommendationEngine::new(artifacts).unwrap();

    TestServer::new(create_router(AppState::new(engine, 2))).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_collaborative_recommendations() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommend/collaborative")
        .json(&json!({ "title": "star wars", "top_n": 1 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["resolved_title"], "Star Wars (1977)");
    assert_eq!(body["strategy"], "collaborative");
    assert_eq!(body["recommendations"], json!(["Return of the Jedi (1983)"]));
}

#[tokio::test]
async fn test_content_recommendations_use_default_top_n() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommend/content")
        .json(&json!({ "title": "MATRIX" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["resolved_title"], "The Matrix (1999)");
    assert_eq!(body["match_count"], 1);
    // Star Trek shares exactly the same tags; Star Wars and Jedi add Adventure
    assert_eq!(
        body["recommendations"],
        json!(["Star Trek: Generations (1994)", "Star Wars (1977)"])
    );
}

#[tokio::test]
async fn test_ambiguous_title_reports_match_count() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommend/content")
        .json(&json!({ "title": "star", "top_n": 1 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["resolved_title"], "Star Wars (1977)");
    assert_eq!(body["match_count"], 2);
}

#[tokio::test]
async fn test_unknown_title_is_not_found() {
    let server = create_test_server();

    for path in ["/api/v1/recommend/collaborative", "/api/v1/recommend/content"] {
        let response = server
            .post(path)
            .json(&json!({ "title": "nonexistent title", "top_n": 3 }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("nonexistent title"));
    }
}

#[tokio::test]
async fn test_unrated_title_is_not_indexed() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommend/collaborative")
        .json(&json!({ "title": "star trek", "top_n": 3 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // the content path still serves it
    let response = server
        .post("/api/v1/recommend/content")
        .json(&json!({ "title": "star trek", "top_n": 3 }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_invalid_top_n_is_bad_request() {
    let server = create_test_server();

    for top_n in [json!(0), json!(-1), json!(2.5), json!("three")] {
        let response = server
            .post("/api/v1/recommend/content")
            .json(&json!({ "title": "matrix", "top_n": top_n }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_item_search() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/items/search")
        .add_query_param("q", "jedi")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["item"]["id"], 2);
    assert_eq!(body["item"]["title"], "Return of the Jedi (1983)");
    assert_eq!(body["match_count"], 1);

    let response = server
        .get("/api/v1/items/search")
        .add_query_param("q", "zzz")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();

    let response = server
        .get("/health")
        .add_header(
            REQUEST_ID,
            HeaderValue::from_static("client-trace-42"),
        )
        .await;
    assert_eq!(response.header(REQUEST_ID), "client-trace-42");

    let response = server.get("/health").await;
    assert!(!response.header(REQUEST_ID).is_empty());
}
