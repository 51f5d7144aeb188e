//! Reference collection - deduplicated ID sets per referenced collection.

use std::collections::HashSet;

use crate::records::{non_blank, LineItem};

/// An insertion-ordered set of non-blank IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet {
    ids: Vec<String>,
    seen: HashSet<String>,
}

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ID. Blank IDs and repeats are ignored.
    pub fn insert(&mut self, id: &str) {
        let Some(id) = non_blank(id) else {
            return;
        };
        if self.seen.insert(id.to_string()) {
            self.ids.push(id.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ids
    }
}

impl<'a> FromIterator<&'a str> for IdSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = IdSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// IDs a set of line items points at, one list per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    pub listing_ids: Vec<String>,
    pub inventory_ids: Vec<String>,
    /// Empty unless model details were requested.
    pub model_ids: Vec<String>,
}

/// Scan line items once and collect what needs batch-fetching.
///
/// Returns `None` when there are no items at all: nothing to fetch, which is
/// not an error.
pub fn collect_references<'a, I>(items: I, include_models: bool) -> Option<References>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut any = false;
    let mut listings = IdSet::new();
    let mut inventories = IdSet::new();
    let mut models = IdSet::new();

    for item in items {
        any = true;
        listings.insert(&item.listing_id);
        inventories.insert(&item.inventory_id);
        if include_models {
            models.insert(&item.model_id);
        }
    }

    any.then(|| References {
        listing_ids: listings.into_vec(),
        inventory_ids: inventories.into_vec(),
        model_ids: models.into_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_listing_collected_once() {
        let items = vec![
            LineItem::new("PB1__TB1", "L1", "M1", 1),
            LineItem::new("PB1__TB2", "L1", "M2", 1),
            LineItem::new("PB2__TB1", "L1", "M1", 3),
        ];

        let refs = collect_references(&items, true).unwrap();
        assert_eq!(refs.listing_ids, vec!["L1"]);
        assert_eq!(refs.inventory_ids, vec!["PB1__TB1", "PB1__TB2", "PB2__TB1"]);
        assert_eq!(refs.model_ids, vec!["M1", "M2"]);
    }

    #[test]
    fn blank_ids_dropped() {
        let items = vec![
            LineItem::new("  ", "", "M1", 1),
            LineItem::new("PB1__TB1", " L2 ", "", 1),
        ];

        let refs = collect_references(&items, true).unwrap();
        assert_eq!(refs.listing_ids, vec!["L2"]);
        assert_eq!(refs.inventory_ids, vec!["PB1__TB1"]);
        assert_eq!(refs.model_ids, vec!["M1"]);
    }

    #[test]
    fn models_only_when_requested() {
        let items = vec![LineItem::new("PB1__TB1", "L1", "M1", 1)];
        let refs = collect_references(&items, false).unwrap();
        assert!(refs.model_ids.is_empty());
    }

    #[test]
    fn no_items_no_references() {
        let items: Vec<LineItem> = vec![];
        assert_eq!(collect_references(&items, true), None);
    }

    #[test]
    fn id_set_keeps_first_seen_order() {
        let set: IdSet = ["b", "a", "b", " ", "c", "a"].into_iter().collect();
        assert_eq!(set.as_slice(), ["b", "a", "c"]);
        assert_eq!(set.len(), 3);
    }
}
