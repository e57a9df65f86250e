//! Movie recommendations from a free-text title, by co-rating patterns
//! (item-item k-nearest neighbours) or by genre similarity (TF-IDF + cosine).
//!
//! Artifacts are built once from the cleaned MovieLens tables, optionally
//! persisted as a snapshot, and then served read-only over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
