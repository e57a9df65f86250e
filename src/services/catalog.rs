use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    error::BuildError,
    models::{Item, ItemId},
};

/// The item table in ingestion order
///
/// Row order matters: title resolution picks the first match by row, and the
/// content feature and similarity matrices share these row positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct Catalog {
    items: Vec<Item>,
    rows: HashMap<ItemId, usize>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Result<Self, BuildError> {
        if items.is_empty() {
            return Err(BuildError::EmptyCatalog);
        }

        let mut rows = HashMap::with_capacity(items.len());
        for (row, item) in items.iter().enumerate() {
            if rows.insert(item.id, row).is_some() {
                return Err(BuildError::DuplicateItem(item.id));
            }
        }

        Ok(Self { items, rows })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, row: usize) -> &Item {
        &self.items[row]
    }

    pub fn row_of(&self, id: ItemId) -> Option<usize> {
        self.rows.get(&id).copied()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.row_of(id).map(|row| &self.items[row])
    }
}

impl TryFrom<Vec<Item>> for Catalog {
    type Error = BuildError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        Catalog::new(items)
    }
}

impl From<Catalog> for Vec<Item> {
    fn from(catalog: Catalog) -> Self {
        catalog.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_input_order() {
        let catalog = Catalog::new(vec![
            Item::new(7, "Seven (Se7en) (1995)", &["Crime", "Thriller"]),
            Item::new(1, "Toy Story (1995)", &["Animation"]),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.row_of(ItemId(1)), Some(1));
        assert_eq!(catalog.get(ItemId(7)).unwrap().title, "Seven (Se7en) (1995)");
        assert_eq!(catalog.get(ItemId(2)), None);
    }

    #[test]
    fn test_empty_catalog_fails() {
        assert!(matches!(Catalog::new(vec![]), Err(BuildError::EmptyCatalog)));
    }

    #[test]
    fn test_duplicate_item_fails() {
        let result = Catalog::new(vec![Item::new(1, "A", &[]), Item::new(1, "B", &[])]);
        assert!(matches!(result, Err(BuildError::DuplicateItem(ItemId(1)))));
    }

    #[test]
    fn test_serde_revalidates() {
        let json = r#"[{"id":1,"title":"A"},{"id":1,"title":"B"}]"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());

        let json = r#"[{"id":1,"title":"A","tags":["Drama"]}]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.item(0).tags, vec!["Drama"]);
    }
}
