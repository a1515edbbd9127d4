use std::collections::HashSet;

use super::row::RowKey;
use super::row::TableRow;
use super::row::row_key;

/// The set of selected row identities.
///
/// Keys are not pruned when rows leave the dataset; [`SelectionState::selected_rows`] only ever
/// returns rows that are present in the dataset it is given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: HashSet<RowKey>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `key`. Returns `true` if the key is now selected.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        if self.selected.remove(&key) {
            false
        } else {
            self.selected.insert(key);
            true
        }
    }

    pub fn contains(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    pub fn is_row_selected<T: TableRow>(&self, row: &T) -> bool {
        self.contains(&row_key(row))
    }

    /// Rows of `dataset` whose identity is selected, in dataset order.
    pub fn selected_rows<'a, T: TableRow>(&self, dataset: &'a [T]) -> Vec<&'a T> {
        if self.selected.is_empty() {
            return Vec::new();
        }
        dataset
            .iter()
            .filter(|row| self.is_row_selected(*row))
            .collect()
    }

    /// Number of stored keys, including keys of rows no longer in the dataset.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.selected.iter()
    }
}
