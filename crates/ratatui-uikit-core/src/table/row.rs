use serde::Deserialize;
use serde::Serialize;
use std::fmt;

use super::value::CellValue;

/// An explicit, stable row identity.
///
/// For JSON rows, any number equal to an `i64` (including `1.0`) becomes [`RowId::Int`]; other
/// numbers are kept as their JSON text in [`RowId::Str`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{n}"),
            RowId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId::Int(value)
    }
}

impl From<u32> for RowId {
    fn from(value: u32) -> Self {
        RowId::Int(value as i64)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Str(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        RowId::Str(value)
    }
}

/// The identity used for selection tracking.
///
/// Rows without an explicit [`RowId`] are keyed by their serialized content, so two rows with
/// identical content share one key and select together.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(RowId),
    Content(String),
}

/// A record that can be shown in a [`crate::table::view::DataTableView`].
///
/// # Example
///
/// ```
/// use ratatui_uikit_core::table::row::{RowId, TableRow};
/// use ratatui_uikit_core::table::value::CellValue;
///
/// #[derive(serde::Serialize)]
/// struct User {
///     id: u32,
///     name: String,
///     age: Option<u32>,
/// }
///
/// impl TableRow for User {
///     fn id(&self) -> Option<RowId> {
///         Some(self.id.into())
///     }
///
///     fn field(&self, data_index: &str) -> CellValue {
///         match data_index {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             "age" => self.age.into(),
///             _ => CellValue::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow: Serialize {
    /// Stable identity of this row, if it has one.
    fn id(&self) -> Option<RowId> {
        None
    }

    /// Projects the field named by a column's `data_index`.
    fn field(&self, data_index: &str) -> CellValue;
}

/// Derives the selection identity of `row`.
pub fn row_key<T: TableRow + ?Sized>(row: &T) -> RowKey {
    if let Some(id) = row.id() {
        return RowKey::Id(id);
    }
    match serde_json::to_string(row) {
        Ok(content) => RowKey::Content(content),
        Err(err) => {
            log::warn!("row has no id and cannot be serialized for identity: {err}");
            RowKey::Content(String::new())
        }
    }
}

impl TableRow for serde_json::Value {
    fn id(&self) -> Option<RowId> {
        match self.get("id")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(RowId::Str(s.clone())),
            serde_json::Value::Number(n) => Some(number_id(n)),
            other => Some(RowId::Str(other.to_string())),
        }
    }

    fn field(&self, data_index: &str) -> CellValue {
        self.get(data_index).map(CellValue::from).unwrap_or_default()
    }
}

// `1.0` and `1` are the same id. Other non-i64 numbers keep their JSON text, so `1.5` shares
// an identity with the string id `"1.5"`.
fn number_id(n: &serde_json::Number) -> RowId {
    if let Some(i) = n.as_i64() {
        return RowId::Int(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            RowId::Int(f as i64)
        }
        _ => RowId::Str(n.to_string()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset must be a JSON array of rows")]
    NotAnArray,
    #[error("row {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Parses a JSON array of objects into rows usable by the table.
pub fn rows_from_json(input: &str) -> Result<Vec<serde_json::Value>, DatasetError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let serde_json::Value::Array(rows) = value else {
        return Err(DatasetError::NotAnArray);
    };
    if let Some(index) = rows.iter().position(|r| !r.is_object()) {
        return Err(DatasetError::NotAnObject { index });
    }
    Ok(rows)
}
