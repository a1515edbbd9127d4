//! `ratatui-uikit-core` provides the widgets and primitives behind `ratatui-uikit`.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - Data stays with the caller: tables borrow the dataset for every operation and never copy it.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-uikit`. Use this crate directly if you
//! only need the widgets.
//!
//! Useful entry points:
//! - [`table::TableState`]: sort/selection engine for a dataset of rows.
//! - [`table::DataTableView`]: renders a table with a sortable header and a select column.
//! - [`field::InputField`]: single-line text input with label, helper text and password mode.
//!
//! ## Events
//!
//! Widgets take [`input::InputEvent`] and return a small action enum describing what changed.
//! With the `crossterm` feature, [`crossterm_input`] converts crossterm events for you.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod field;
pub mod input;
pub mod keymap;
pub mod render;
pub mod table;
pub mod viewport;
