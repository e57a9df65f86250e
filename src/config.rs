use serde::Deserialize;

use crate::services::interactions::DuplicatePolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Cleaned ratings table (user_id,item_id,rating,timestamp)
    #[serde(default = "default_ratings_path")]
    pub ratings_path: String,

    /// Cleaned items table (item_id,title,release_date,IMDb_URL,genres)
    #[serde(default = "default_items_path")]
    pub items_path: String,

    /// Where built artifacts are persisted; loaded instead of rebuilding when present
    #[serde(default)]
    pub snapshot_path: Option<String>,

    /// How repeated ratings for the same (user, item) pair are combined
    #[serde(default)]
    pub duplicate_ratings: DuplicatePolicy,

    /// Recommendation count used when a request omits `top_n`
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Build (and persist) the artifacts, then exit without serving
    #[serde(default)]
    pub build_only: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_ratings_path() -> String {
    "data/ratings.csv".to_string()
}

fn default_items_path() -> String {
    "data/movies_metadata.csv".to_string()
}

fn default_top_n() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
