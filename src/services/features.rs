//! TF-IDF feature vectors over item tags.
//!
//! Each item becomes a synthetic document made of its tag labels. Every distinct
//! tag label is one vocabulary term, so `Sci-Fi` stays a single column instead of
//! being split on punctuation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::Item;

/// Separator used when joining an item's tags into its document
pub const TAG_SEPARATOR: char = '|';

/// Common English words never admitted into the vocabulary
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "in", "is", "it",
    "its", "of", "on", "or", "that", "the", "to", "was", "were", "will", "with", "this", "but",
    "not", "no", "so", "than", "too", "very", "can", "all", "any", "other", "some", "such",
];

/// Dense TF-IDF matrix, one L2-normalised row per catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureMatrix {
    /// Sorted vocabulary; position is the column index
    pub vocabulary: Vec<String>,
    /// Inverse document frequency per column
    pub idf: Vec<f64>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn n_items(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    /// Column index of a term, if it survived the stoplist
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }
}

/// Builds [`FeatureMatrix`] values from item tags
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    stop_words: HashSet<String>,
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::with_stop_words(ENGLISH_STOP_WORDS)
    }
}

impl FeatureBuilder {
    /// Creates a builder that excludes the given terms from the vocabulary
    pub fn with_stop_words(stop_words: &[&str]) -> Self {
        Self {
            stop_words: stop_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Joins an item's tags into its document, skipping blank labels
    pub fn document(item: &Item) -> String {
        let mut document = String::new();
        for tag in item.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !document.is_empty() {
                document.push(TAG_SEPARATOR);
            }
            document.push_str(tag);
        }
        document
    }

    fn terms(&self, document: &str) -> Vec<String> {
        document
            .split(TAG_SEPARATOR)
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && !self.stop_words.contains(t))
            .collect()
    }

    /// Computes the TF-IDF matrix for `items`, rows in the same order
    ///
    /// Term frequency is the raw count of a term in the document. IDF is smoothed:
    /// `ln((1 + n) / (1 + df)) + 1`, so a term present in every document still
    /// carries weight 1. Rows are L2-normalised; an item without terms is a zero row.
    pub fn build(&self, items: &[Item]) -> FeatureMatrix {
        let documents: Vec<Vec<String>> = items
            .iter()
            .map(|item| self.terms(&Self::document(item)))
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &documents {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let vocabulary: Vec<String> = document_frequency.keys().map(|t| t.to_string()).collect();
        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let column: BTreeMap<&str, usize> = document_frequency
            .keys()
            .enumerate()
            .map(|(idx, term)| (*term, idx))
            .collect();

        let rows = documents
            .iter()
            .map(|terms| {
                let mut row = vec![0.0; vocabulary.len()];
                for term in terms {
                    row[column[term.as_str()]] += 1.0;
                }
                for (weight, idf) in row.iter_mut().zip(&idf) {
                    *weight *= idf;
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        tracing::debug!(
            items = items.len(),
            terms = vocabulary.len(),
            "Built TF-IDF feature matrix"
        );

        FeatureMatrix {
            vocabulary,
            idf,
            rows,
        }
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in row.iter_mut() {
            *x /= norm;
        }
    }
}
