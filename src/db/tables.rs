//! Loaders for the cleaned tables written by the ingestion step.

use chrono::{DateTime, NaiveDate};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{
    error::BuildError,
    models::{Item, ItemId, Rating, UserId},
};

/// MovieLens release date layout, e.g. `01-Jan-1995`
const RELEASE_DATE_FORMAT: &str = "%d-%b-%Y";

/// Row of `movies_metadata.csv`
#[derive(Debug, Deserialize)]
struct ItemRecord {
    item_id: u32,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(rename = "IMDb_URL", default)]
    imdb_url: Option<String>,
    /// Comma-separated genre labels
    #[serde(default)]
    genres: Option<String>,
}

/// Row of `ratings.csv`
#[derive(Debug, Deserialize)]
struct RatingRecord {
    user_id: u32,
    item_id: u32,
    rating: f32,
    /// Unix seconds
    #[serde(default)]
    timestamp: Option<i64>,
}

/// Reads the item table, keeping file order
pub fn read_items<R: Read>(reader: R) -> Result<Vec<Item>, BuildError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for (idx, record) in rdr.deserialize::<ItemRecord>().enumerate() {
        let record = record?;
        let release_date = match record.release_date.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT).map_err(
                |e| BuildError::MalformedRow {
                    table: "items",
                    row: idx + 1,
                    message: format!("release_date {raw:?}: {e}"),
                },
            )?),
        };

        items.push(Item {
            id: ItemId(record.item_id),
            title: record.title,
            release_date,
            imdb_url: record.imdb_url.filter(|u| !u.is_empty()),
            tags: split_genres(record.genres.as_deref().unwrap_or_default()),
        });
    }

    Ok(items)
}

/// Reads the rating relation, keeping file order
pub fn read_ratings<R: Read>(reader: R) -> Result<Vec<Rating>, BuildError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut ratings = Vec::new();
    for (idx, record) in rdr.deserialize::<RatingRecord>().enumerate() {
        let record = record?;
        let malformed = |message: String| BuildError::MalformedRow {
            table: "ratings",
            row: idx + 1,
            message,
        };

        if !record.rating.is_finite() {
            return Err(malformed(format!("rating {} is not finite", record.rating)));
        }
        let timestamp = match record.timestamp {
            None => None,
            Some(secs) => Some(
                DateTime::from_timestamp(secs, 0)
                    .ok_or_else(|| malformed(format!("timestamp {secs} out of range")))?,
            ),
        };

        ratings.push(Rating {
            user_id: UserId(record.user_id),
            item_id: ItemId(record.item_id),
            score: record.rating,
            timestamp,
        });
    }

    Ok(ratings)
}

pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<Item>, BuildError> {
    read_items(File::open(path)?)
}

pub fn load_ratings(path: impl AsRef<Path>) -> Result<Vec<Rating>, BuildError> {
    read_ratings(File::open(path)?)
}

fn split_genres(genres: &str) -> Vec<String> {
    genres
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}
