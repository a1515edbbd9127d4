use std::fmt;

use super::column::Column;
use super::row::TableRow;
use super::row::row_key;
use super::selection::SelectionState;
use super::sort::SortDirection;
use super::sort::SortState;
use super::sort::sort_rows;

/// Selection-change callback, called with the selected rows in dataset order.
pub type RowSelectCallback<T> = Box<dyn FnMut(&[&T])>;

/// Sort and selection state of one table.
///
/// The state does not own the dataset: every operation that needs rows takes the current
/// dataset, and the sorted view is computed on read. Nothing here fails; unknown or
/// non-sortable columns degrade to no-ops.
pub struct TableState<T> {
    columns: Vec<Column<T>>,
    sort: SortState,
    selection: SelectionState,
    on_row_select: Option<RowSelectCallback<T>>,
}

impl<T> TableState<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            sort: SortState::default(),
            selection: SelectionState::default(),
            on_row_select: None,
        }
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Replaces the schema. The sort state is kept; if its column disappeared the view falls
    /// back to dataset order.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) {
        self.columns = columns;
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// The column the current sort resolves to, if any.
    pub fn sort_column(&self) -> Option<&Column<T>> {
        self.sort.key.as_deref().and_then(|key| self.column(key))
    }

    /// Registers the callback invoked after every selection toggle.
    pub fn on_row_select<F>(&mut self, callback: F)
    where
        F: FnMut(&[&T]) + 'static,
    {
        self.on_row_select = Some(Box::new(callback));
    }

    /// Sorts by `column_key`: ascending for a new column, flipped for the active one.
    ///
    /// Returns `false` (and changes nothing) for unknown or non-sortable columns.
    pub fn request_sort(&mut self, column_key: &str) -> bool {
        let Some(column) = self.column(column_key) else {
            log::debug!("sort ignored: unknown column {column_key:?}");
            return false;
        };
        if !column.sortable {
            log::debug!("sort ignored: column {column_key:?} is not sortable");
            return false;
        }

        self.sort = if self.sort.is_sorted_by(column_key) {
            SortState::new(column_key, self.sort.direction.flipped())
        } else {
            SortState::new(column_key, SortDirection::Ascending)
        };
        log::debug!("sort set to {column_key:?} {:?}", self.sort.direction);
        true
    }

    /// Glyph to draw next to `column_key`'s header, if it is the active sortable column.
    pub fn sort_indicator(&self, column_key: &str) -> Option<&'static str> {
        let column = self.column(column_key)?;
        (column.sortable && self.sort.is_sorted_by(column_key))
            .then(|| self.sort.direction.glyph())
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Number of selected identities, counting ones whose rows have left the dataset.
    pub fn selected_len(&self) -> usize {
        self.selection.len()
    }

    /// Deselects everything; the selection callback sees an empty list.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        if let Some(callback) = self.on_row_select.as_mut() {
            callback(&[]);
        }
    }

    /// `true` when the renderer should show the "no data" placeholder.
    pub fn is_empty_view(dataset: &[T], loading: bool) -> bool {
        is_empty_view(dataset, loading)
    }
}

impl<T: TableRow> TableState<T> {
    /// `dataset` ordered by the current sort state, as a fresh sequence.
    pub fn view<'a>(&self, dataset: &'a [T]) -> Vec<&'a T> {
        match self.sort_column() {
            Some(column) => sort_rows(dataset, &column.data_index, self.sort.direction),
            None => dataset.iter().collect(),
        }
    }

    /// Flips selection of `row` and returns the selected rows of `dataset`, in dataset order.
    ///
    /// The registered selection callback, if any, receives the same list.
    pub fn toggle_selection<'a>(&mut self, row: &T, dataset: &'a [T]) -> Vec<&'a T> {
        let key = row_key(row);
        let now_selected = self.selection.toggle(key);
        let rows = self.selection.selected_rows(dataset);
        log::debug!(
            "row {}; {} row(s) selected",
            if now_selected { "selected" } else { "deselected" },
            rows.len()
        );
        if let Some(callback) = self.on_row_select.as_mut() {
            callback(&rows);
        }
        rows
    }

    pub fn is_selected(&self, row: &T) -> bool {
        self.selection.is_row_selected(row)
    }

    pub fn selected_rows<'a>(&self, dataset: &'a [T]) -> Vec<&'a T> {
        self.selection.selected_rows(dataset)
    }
}

/// `true` iff not loading and there are no rows.
pub fn is_empty_view<T>(dataset: &[T], loading: bool) -> bool {
    !loading && dataset.is_empty()
}

impl<T> fmt::Debug for TableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableState")
            .field("columns", &self.columns)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("on_row_select", &self.on_row_select.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn people() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Alice", "age": 26, "city": "Berlin"}),
            json!({"id": 2, "name": "Bob", "age": 34, "city": "Paris"}),
            json!({"id": 3, "name": "Charlie", "age": 29, "city": "Delhi"}),
        ]
    }

    fn schema() -> Vec<Column<Value>> {
        vec![
            Column::new("name", "Name").sortable(true),
            Column::new("age", "Age").sortable(true),
            Column::new("city", "City"),
        ]
    }

    fn ids(rows: &[&Value]) -> Vec<i64> {
        rows.iter().filter_map(|r| r["id"].as_i64()).collect()
    }

    #[test]
    fn starts_unsorted_with_empty_selection() {
        let state = TableState::new(schema());
        let data = people();
        assert_eq!(state.sort_state(), &SortState::default());
        assert_eq!(ids(&state.view(&data)), [1, 2, 3]);
        assert!(state.selection().is_empty());
    }

    #[test]
    fn same_column_cycles_direction() {
        let mut state = TableState::new(schema());
        assert!(state.request_sort("age"));
        assert_eq!(state.sort_state(), &SortState::new("age", SortDirection::Ascending));
        assert!(state.request_sort("age"));
        assert_eq!(state.sort_state(), &SortState::new("age", SortDirection::Descending));
        assert!(state.request_sort("age"));
        assert_eq!(state.sort_state(), &SortState::new("age", SortDirection::Ascending));
    }

    #[test]
    fn switching_columns_resets_to_ascending() {
        let mut state = TableState::new(schema());
        state.request_sort("age");
        state.request_sort("age");
        state.request_sort("name");
        assert_eq!(state.sort_state(), &SortState::new("name", SortDirection::Ascending));
    }

    #[test]
    fn non_sortable_and_unknown_columns_are_ignored() {
        let mut state = TableState::new(schema());
        state.request_sort("name");
        let before = state.sort_state().clone();
        assert!(!state.request_sort("city"));
        assert!(!state.request_sort("nope"));
        assert_eq!(state.sort_state(), &before);
    }

    #[test]
    fn sorts_numbers_and_text() {
        let mut state = TableState::new(schema());
        let data = people();
        state.request_sort("age");
        assert_eq!(ids(&state.view(&data)), [1, 3, 2]);
        state.request_sort("age");
        assert_eq!(ids(&state.view(&data)), [2, 3, 1]);
        state.request_sort("name");
        assert_eq!(ids(&state.view(&data)), [1, 2, 3]);
    }

    #[test]
    fn view_does_not_touch_dataset() {
        let mut state = TableState::new(schema());
        let data = people();
        state.request_sort("age");
        state.request_sort("age");
        let _ = state.view(&data);
        assert_eq!(data, people());
    }

    #[test]
    fn nulls_last_ascending_first_descending() {
        let cols = vec![Column::<Value>::new("v", "V").sortable(true)];
        let mut state = TableState::new(cols);
        let data = vec![
            json!({"id": 1, "v": 5}),
            json!({"id": 2, "v": null}),
            json!({"id": 3, "v": 1}),
        ];
        state.request_sort("v");
        assert_eq!(ids(&state.view(&data)), [3, 1, 2]);
        state.request_sort("v");
        assert_eq!(ids(&state.view(&data)), [2, 1, 3]);
    }

    #[test]
    fn missing_field_sorts_like_null() {
        let mut state = TableState::new(schema());
        let data = vec![
            json!({"id": 1, "city": "Paris"}),
            json!({"id": 2}),
            json!({"id": 3, "city": "Berlin"}),
        ];
        state.set_columns(vec![Column::new("city", "City").sortable(true)]);
        state.request_sort("city");
        assert_eq!(ids(&state.view(&data)), [3, 1, 2]);
    }

    #[test]
    fn text_sort_is_case_insensitive() {
        let mut state = TableState::new(schema());
        let data = vec![json!({"id": 1, "name": "b"}), json!({"id": 2, "name": "A"})];
        state.request_sort("name");
        assert_eq!(ids(&state.view(&data)), [2, 1]);
    }

    #[test]
    fn repeated_reads_are_deterministic() {
        let mut state = TableState::new(schema());
        let data = people();
        state.request_sort("name");
        let first = ids(&state.view(&data));
        assert_eq!(ids(&state.view(&data)), first);
    }

    #[test]
    fn removed_sort_column_falls_back_to_dataset_order() {
        let mut state = TableState::new(schema());
        let data = people();
        state.request_sort("age");
        state.request_sort("age");
        state.set_columns(vec![Column::new("name", "Name")]);
        assert_eq!(ids(&state.view(&data)), [1, 2, 3]);
    }

    #[test]
    fn sort_indicator_tracks_active_column() {
        let mut state = TableState::new(schema());
        assert_eq!(state.sort_indicator("name"), None);
        state.request_sort("name");
        assert_eq!(state.sort_indicator("name"), Some("↑"));
        assert_eq!(state.sort_indicator("age"), None);
        state.request_sort("name");
        assert_eq!(state.sort_indicator("name"), Some("↓"));
    }

    #[test]
    fn toggle_twice_restores_selection() {
        let mut state = TableState::new(schema());
        let data = people();
        let first = state.toggle_selection(&data[2], &data);
        assert_eq!(ids(&first), [3]);
        let before = state.selection().clone();
        let with_a = state.toggle_selection(&data[0], &data);
        assert_eq!(ids(&with_a), [1, 3]);
        let back = state.toggle_selection(&data[0], &data);
        assert_eq!(ids(&back), [3]);
        assert_eq!(state.selection(), &before);
    }

    #[test]
    fn selected_rows_follow_dataset_order_not_view_order() {
        let mut state = TableState::new(schema());
        let data = people();
        state.request_sort("age");
        state.request_sort("age");
        state.toggle_selection(&data[0], &data);
        state.toggle_selection(&data[1], &data);
        assert_eq!(ids(&state.selected_rows(&data)), [1, 2]);
        assert!(state.is_selected(&data[1]));
        assert!(!state.is_selected(&data[2]));
    }

    #[test]
    fn rows_without_id_collapse_when_identical() {
        let mut state = TableState::new(schema());
        let data = vec![json!({"name": "x"}), json!({"name": "x"}), json!({"name": "y"})];
        let selected = state.toggle_selection(&data[0], &data);
        assert_eq!(selected.len(), 2);
        assert!(state.is_selected(&data[1]));
        assert!(!state.is_selected(&data[2]));
    }

    #[test]
    fn callback_receives_selected_rows() {
        let mut state = TableState::new(schema());
        let seen: Rc<RefCell<Vec<Vec<i64>>>> = Rc::default();
        let sink = seen.clone();
        state.on_row_select(move |rows| sink.borrow_mut().push(ids(rows)));
        let data = people();
        state.toggle_selection(&data[1], &data);
        state.toggle_selection(&data[1], &data);
        assert_eq!(*seen.borrow(), vec![vec![2], vec![]]);
    }

    #[test]
    fn clear_selection_notifies_once() {
        let mut state = TableState::new(schema());
        let calls = Rc::new(RefCell::new(0usize));
        let sink = calls.clone();
        state.on_row_select(move |_| *sink.borrow_mut() += 1);
        state.clear_selection();
        assert_eq!(*calls.borrow(), 0);
        let data = people();
        state.toggle_selection(&data[0], &data);
        state.toggle_selection(&data[2], &data);
        assert_eq!(state.selected_len(), 2);
        state.clear_selection();
        assert_eq!(state.selected_len(), 0);
        assert_eq!(*calls.borrow(), 3);
    }

    #[test]
    fn empty_view_depends_on_loading() {
        let empty: Vec<Value> = Vec::new();
        assert!(is_empty_view(&empty, false));
        assert!(!is_empty_view(&empty, true));
        assert!(!TableState::is_empty_view(&people(), false));
    }
}
