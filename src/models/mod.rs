use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier for a catalog item (a MovieLens movie id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

/// Identifier for a rating user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recommendable movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub imdb_url: Option<String>,
    /// Genre labels, unordered
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(id: u32, title: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            release_date: None,
            imdb_url: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// One observed (user, item, score) triple
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub score: f32,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Rating {
    pub fn new(user_id: u32, item_id: u32, score: f32) -> Self {
        Self {
            user_id: UserId(user_id),
            item_id: ItemId(item_id),
            score,
            timestamp: None,
        }
    }
}

/// Which recommendation strategy produced a result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Collaborative,
    Content,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Collaborative => write!(f, "collaborative"),
            Strategy::Content => write!(f, "content"),
        }
    }
}

/// Request body for both recommendation endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default)]
    pub top_n: Option<i64>,
}

/// Ordered recommendations for a resolved title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    /// Canonical title the query resolved to
    pub resolved_title: String,
    /// How many catalog titles matched the query; only the first was used
    pub match_count: usize,
    pub strategy: Strategy,
    pub recommendations: Vec<String>,
}

/// Response for the item lookup endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ItemMatch {
    pub item: Item,
    pub match_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_serializes_as_number() {
        let json = serde_json::to_string(&ItemId(50)).unwrap();
        assert_eq!(json, "50");

        let deserialized: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, ItemId(50));
    }

    #[test]
    fn test_strategy_serialization() {
        let json = serde_json::to_string(&Strategy::Collaborative).unwrap();
        assert_eq!(json, "\"collaborative\"");
        assert_eq!(Strategy::Content.to_string(), "content");
    }

    #[test]
    fn test_request_top_n_is_optional() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"title": "star wars"}"#).unwrap();
        assert_eq!(request.title, "star wars");
        assert_eq!(request.top_n, None);
    }

    #[test]
    fn test_item_new_keeps_tag_order() {
        let item = Item::new(1, "Toy Story (1995)", &["Animation", "Children's", "Comedy"]);
        assert_eq!(item.id, ItemId(1));
        assert_eq!(item.tags, vec!["Animation", "Children's", "Comedy"]);
        assert_eq!(item.release_date, None);
    }
}
