use ratatui::text::Line;
use std::fmt;
use std::sync::Arc;

use super::value::CellValue;

/// Caller-supplied cell renderer: `(value, row) -> line`.
///
/// The sort/selection engine never calls it. The table renderer calls it for every row when
/// sizing a column without a fixed width, and again for each row it draws. Give wide or costly
/// columns a fixed [`Column::width`] to skip the sizing pass.
pub type CellRenderer<T> = Arc<dyn Fn(&CellValue, &T) -> Line<'static> + Send + Sync>;

/// One projectable (and optionally sortable) facet of a row.
pub struct Column<T> {
    /// Identifier of the column within its schema.
    pub key: String,
    /// Header text.
    pub title: String,
    /// Row field this column projects (see [`super::row::TableRow::field`]).
    pub data_index: String,
    pub sortable: bool,
    pub render: Option<CellRenderer<T>>,
    /// Fixed width in columns. `None` sizes the column to its content.
    pub width: Option<u16>,
}

impl<T> Column<T> {
    /// A column whose `data_index` equals its `key`.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            data_index: key.clone(),
            key,
            title: title.into(),
            sortable: false,
            render: None,
            width: None,
        }
    }

    pub fn data_index(mut self, data_index: impl Into<String>) -> Self {
        self.data_index = data_index.into();
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &T) -> Line<'static> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            data_index: self.data_index.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("data_index", &self.data_index)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| ".."))
            .field("width", &self.width)
            .finish()
    }
}
