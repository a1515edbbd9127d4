//! Sortable, selectable tables.
//!
//! [`state::TableState`] is the sort/selection engine and knows nothing about terminals;
//! [`view::DataTableView`] renders it with ratatui and turns input into engine operations.

pub mod column;
pub mod row;
pub mod selection;
pub mod sort;
pub mod state;
pub mod value;
pub mod view;

pub use column::Column;
pub use row::RowId;
pub use row::RowKey;
pub use row::TableRow;
pub use sort::SortDirection;
pub use sort::SortState;
pub use state::TableState;
pub use value::CellValue;
pub use view::DataTableAction;
pub use view::DataTableOptions;
pub use view::DataTableView;
