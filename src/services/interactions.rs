use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::{
    error::BuildError,
    models::{ItemId, Rating, UserId},
};

/// How repeated ratings of one item by one user are combined
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later rating in input order replaces the earlier one
    #[default]
    LastWins,
    /// Duplicate scores are averaged
    Mean,
}

/// Dense items × users rating grid, zero where a user did not rate an item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionMatrix {
    /// Row index: distinct rated item ids, ascending
    item_ids: Vec<ItemId>,
    /// Column index: distinct user ids, ascending
    user_ids: Vec<UserId>,
    rows: Vec<Vec<f32>>,
}

impl InteractionMatrix {
    /// Pivots rating triples into an item-major matrix
    pub fn build(ratings: &[Rating], policy: DuplicatePolicy) -> Result<Self, BuildError> {
        if ratings.is_empty() {
            return Err(BuildError::EmptyRatings);
        }

        let item_ids: Vec<ItemId> = ratings
            .iter()
            .map(|r| r.item_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let user_ids: Vec<UserId> = ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let item_row: HashMap<ItemId, usize> =
            item_ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let user_col: HashMap<UserId, usize> =
            user_ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut rows = vec![vec![0.0f32; user_ids.len()]; item_ids.len()];
        let mut duplicates = 0usize;

        match policy {
            DuplicatePolicy::LastWins => {
                let mut seen = vec![vec![false; user_ids.len()]; item_ids.len()];
                for rating in ratings {
                    let (row, col) = (item_row[&rating.item_id], user_col[&rating.user_id]);
                    if seen[row][col] {
                        duplicates += 1;
                    }
                    seen[row][col] = true;
                    rows[row][col] = rating.score;
                }
            }
            DuplicatePolicy::Mean => {
                let mut sums: HashMap<(usize, usize), (f64, u32)> = HashMap::new();
                for rating in ratings {
                    let cell = (item_row[&rating.item_id], user_col[&rating.user_id]);
                    let entry = sums.entry(cell).or_insert((0.0, 0));
                    entry.0 += f64::from(rating.score);
                    entry.1 += 1;
                }
                for ((row, col), (sum, count)) in sums {
                    if count > 1 {
                        duplicates += count as usize - 1;
                    }
                    rows[row][col] = (sum / f64::from(count)) as f32;
                }
            }
        }

        if duplicates > 0 {
            tracing::warn!(
                duplicates,
                policy = ?policy,
                "Ratings contain repeated (user, item) pairs"
            );
        }

        tracing::debug!(
            items = item_ids.len(),
            users = user_ids.len(),
            ratings = ratings.len(),
            "Built interaction matrix"
        );

        Ok(Self {
            item_ids,
            user_ids,
            rows,
        })
    }

    pub fn n_items(&self) -> usize {
        self.item_ids.len()
    }

    pub fn n_users(&self) -> usize {
        self.user_ids.len()
    }

    pub fn item_ids(&self) -> &[ItemId] {
        &self.item_ids
    }

    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Row position of an item, `None` if the item was never rated
    pub fn row_of(&self, item_id: ItemId) -> Option<usize> {
        self.item_ids.binary_search(&item_id).ok()
    }

    pub fn item_at(&self, row: usize) -> ItemId {
        self.item_ids[row]
    }

    /// Rating of `item_id` by `user_id`, 0 when absent
    pub fn get(&self, item_id: ItemId, user_id: UserId) -> f32 {
        match (self.row_of(item_id), self.user_ids.binary_search(&user_id)) {
            (Some(row), Ok(col)) => self.rows[row][col],
            _ => 0.0,
        }
    }

    /// Whether the grid shape agrees with its index vectors
    pub fn is_well_formed(&self) -> bool {
        self.rows.len() == self.item_ids.len()
            && self.rows.iter().all(|r| r.len() == self.user_ids.len())
            && self.item_ids.windows(2).all(|w| w[0] < w[1])
            && self.user_ids.windows(2).all(|w| w[0] < w[1])
    }
}
