use feruca::Collator;
use feruca::Locale;
use feruca::Tailoring;
use serde::Deserialize;
use serde::Serialize;
use std::cell::RefCell;
use std::cmp::Ordering;

use super::row::TableRow;
use super::value::CellValue;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header glyph for a column sorted in this direction.
    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Active sort column and direction. A `None` key keeps dataset order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

/// Ascending order of two cell values.
///
/// Nulls sort after everything else. Two numbers compare numerically (NaN compares equal to
/// anything). Any other pair compares by display text with [`compare_text`].
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    compare_text(&a.to_string(), &b.to_string())
}

thread_local! {
    static COLLATOR: RefCell<Collator> =
        RefCell::new(Collator::new(Tailoring::Cldr(Locale::Root), false, true));
}

/// String ordering under the Unicode Collation Algorithm with the CLDR root collation.
///
/// Differences in base letters win over accents, and accents over case, so `"A" < "b"`,
/// `"e" < "é" < "f"` and `"a" < "A"`. Punctuation and symbols are not ignored; they sort before
/// digits, which sort before letters. Strings equal at every level fall back to code point order.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

/// Orders `dataset` by the field at `data_index`.
///
/// Ascending order is stable by dataset position. Descending is the whole ascending result
/// reversed, so nulls lead and equal keys appear in reverse dataset order.
pub fn sort_rows<'a, T: TableRow>(
    dataset: &'a [T],
    data_index: &str,
    direction: SortDirection,
) -> Vec<&'a T> {
    let mut keyed: Vec<(CellValue, &'a T)> = dataset
        .iter()
        .map(|row| (row.field(data_index), row))
        .collect();
    merge_sort_by(&mut keyed, &mut |a, b| compare_values(&a.0, &b.0));
    let mut rows: Vec<&'a T> = keyed.into_iter().map(|(_, row)| row).collect();
    if direction == SortDirection::Descending {
        rows.reverse();
    }
    rows
}

// A plain stable merge sort. Mixed-type columns make `compare_values` non-transitive, which
// `slice::sort_by` is allowed to panic on; this never does.
fn merge_sort_by<E: Clone, F>(items: &mut [E], cmp: &mut F)
where
    F: FnMut(&E, &E) -> Ordering,
{
    let n = items.len();
    if n <= 1 {
        return;
    }
    let mid = n / 2;
    merge_sort_by(&mut items[..mid], cmp);
    merge_sort_by(&mut items[mid..], cmp);

    let mut merged: Vec<E> = Vec::with_capacity(n);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < n {
        if cmp(&items[j], &items[i]) == Ordering::Less {
            merged.push(items[j].clone());
            j += 1;
        } else {
            merged.push(items[i].clone());
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..]);
    items.clone_from_slice(&merged);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn texts(rows: &[&serde_json::Value], field: &str) -> Vec<String> {
        rows.iter().map(|r| r.field(field).display_text()).collect()
    }

    #[test]
    fn text_ignores_case_first() {
        assert_eq!(compare_text("A", "b"), Ordering::Less);
        assert_eq!(compare_text("b", "A"), Ordering::Greater);
        assert_eq!(compare_text("a", "A"), Ordering::Less);
        assert_eq!(compare_text("abc", "ABD"), Ordering::Less);
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accents_and_symbols_follow_root_collation() {
        let data: Vec<serde_json::Value> = ["f", "é", "e", "~x", "1", "Émile", "Zoe"]
            .into_iter()
            .map(|v| json!({"v": v}))
            .collect();
        let asc = sort_rows(&data, "v", SortDirection::Ascending);
        assert_eq!(texts(&asc, "v"), ["~x", "1", "e", "é", "Émile", "f", "Zoe"]);
        assert_eq!(compare_text("Émile", "Emma"), Ordering::Less);
        assert_eq!(compare_text("é", "f"), Ordering::Less);
    }

    #[test]
    fn nulls_are_maximal() {
        let null = CellValue::Null;
        let one = CellValue::Number(1.0);
        assert_eq!(compare_values(&null, &one), Ordering::Greater);
        assert_eq!(compare_values(&one, &null), Ordering::Less);
        assert_eq!(compare_values(&null, &null), Ordering::Equal);
    }

    #[test]
    fn numbers_compare_numerically_not_textually() {
        assert_eq!(
            compare_values(&CellValue::Number(9.0), &CellValue::Number(10.0)),
            Ordering::Less
        );
        // mixed: "10" vs "9" as text
        assert_eq!(
            compare_values(&CellValue::Number(10.0), &CellValue::Text("9".into())),
            Ordering::Less
        );
    }

    #[test]
    fn descending_is_reversed_ascending() {
        let data = vec![
            json!({"id": 1, "g": "x"}),
            json!({"id": 2, "g": "x"}),
            json!({"id": 3, "g": "a"}),
        ];
        let asc = sort_rows(&data, "g", SortDirection::Ascending);
        assert_eq!(texts(&asc, "id"), ["3", "1", "2"]);
        let desc = sort_rows(&data, "g", SortDirection::Descending);
        assert_eq!(texts(&desc, "id"), ["2", "1", "3"]);
    }

    #[test]
    fn mixed_types_do_not_panic() {
        let data = vec![
            json!({"v": 10}),
            json!({"v": "5"}),
            json!({"v": 9}),
            json!({"v": true}),
            json!({"v": null}),
            json!({"v": 1.5}),
        ];
        let out = sort_rows(&data, "v", SortDirection::Ascending);
        assert_eq!(out.len(), data.len());
        assert!(out.last().map(|r| r.field("v").is_null()).unwrap_or(false));
    }
}
