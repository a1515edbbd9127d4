//! `ratatui-uikit` is a small component kit for ratatui apps: a sortable, selectable
//! [`table::DataTableView`] and a labelled [`field::InputField`].
//!
//! The widgets live in `ratatui-uikit-core` and are re-exported here. This crate adds
//! [`stories`], a catalogue of ready-made configurations used by the `storybook` example and
//! handy as a starting point for your own screens.
//!
//! ## Example
//!
//! ```
//! use ratatui_uikit::table::Column;
//! use ratatui_uikit::table::TableState;
//! use serde_json::json;
//!
//! let data = vec![json!({"id": 1, "age": 34}), json!({"id": 2, "age": 26})];
//! let mut state = TableState::new(vec![Column::new("age", "Age").sortable(true)]);
//! state.request_sort("age");
//! let ages: Vec<_> = state.view(&data).iter().map(|r| r["age"].clone()).collect();
//! assert_eq!(ages, [json!(26), json!(34)]);
//! ```
pub use ratatui_uikit_core::field;
pub use ratatui_uikit_core::input;
pub use ratatui_uikit_core::keymap;
pub use ratatui_uikit_core::render;
pub use ratatui_uikit_core::table;
pub use ratatui_uikit_core::theme;
pub use ratatui_uikit_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_uikit_core::crossterm_input;

pub mod stories;
