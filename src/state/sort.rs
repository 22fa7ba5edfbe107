//! Single-column sort state and the typed row comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction. New columns start Descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The single active sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    /// Resolve a header click: the active column toggles direction, a new
    /// column resets to the default (Descending).
    pub fn toggled(current: Option<&SortState>, column: &str) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column: column.to_string(),
                direction: state.direction.flipped(),
            },
            _ => SortState {
                column: column.to_string(),
                direction: SortDirection::Descending,
            },
        }
    }
}

/// A cell value as seen by the comparator.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    /// Epoch milliseconds.
    Date(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl SortValue {
    /// String coercion used when comparing mismatched types.
    fn coerced(&self) -> String {
        match self {
            Self::Number(n) | Self::Date(n) => format!("{n}"),
            Self::Text(s) => s.clone(),
            Self::Bool(b) => format!("{b}"),
            Self::Null => String::new(),
        }
    }
}

/// Compare two cell values under a direction.
///
/// Numbers by numeric difference, dates by epoch difference, strings
/// case-folded, booleans false-before-true; mismatched types fall back to
/// string coercion. Nulls sort to the end regardless of direction — the
/// null check runs before the direction reversal.
pub fn compare_values(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortValue::Null, SortValue::Null) => return Ordering::Equal,
        (SortValue::Null, _) => return Ordering::Greater,
        (_, SortValue::Null) => return Ordering::Less,
        _ => {}
    }

    let ascending = match (a, b) {
        (SortValue::Number(x), SortValue::Number(y))
        | (SortValue::Date(x), SortValue::Date(y)) => x.total_cmp(y),
        (SortValue::Text(x), SortValue::Text(y)) => {
            x.to_lowercase().cmp(&y.to_lowercase()).then_with(|| x.cmp(y))
        }
        (SortValue::Bool(x), SortValue::Bool(y)) => x.cmp(y),
        _ => a.coerced().cmp(&b.coerced()),
    };

    match direction {
        SortDirection::Ascending => ascending,
        SortDirection::Descending => ascending.reverse(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn toggle_same_column_flips() {
        let first = SortState::toggled(None, "age");
        assert_eq!(first.direction, SortDirection::Descending);
        let second = SortState::toggled(Some(&first), "age");
        assert_eq!(second.direction, SortDirection::Ascending);
        let third = SortState::toggled(Some(&second), "age");
        assert_eq!(third, first);
    }

    #[test]
    fn toggle_other_column_resets_to_descending() {
        let age = SortState {
            column: "age".to_string(),
            direction: SortDirection::Ascending,
        };
        let name = SortState::toggled(Some(&age), "name");
        assert_eq!(name.column, "name");
        assert_eq!(name.direction, SortDirection::Descending);
    }

    #[test_case(SortDirection::Ascending; "ascending")]
    #[test_case(SortDirection::Descending; "descending")]
    fn nulls_sort_to_the_end(direction: SortDirection) {
        let null = SortValue::Null;
        let n = SortValue::Number(1.0);
        assert_eq!(compare_values(&null, &n, direction), Ordering::Greater);
        assert_eq!(compare_values(&n, &null, direction), Ordering::Less);
        assert_eq!(compare_values(&null, &null, direction), Ordering::Equal);
    }

    #[test]
    fn numbers_compare_numerically() {
        let a = SortValue::Number(2.0);
        let b = SortValue::Number(10.0);
        assert_eq!(compare_values(&a, &b, SortDirection::Ascending), Ordering::Less);
        assert_eq!(
            compare_values(&a, &b, SortDirection::Descending),
            Ordering::Greater
        );
    }

    #[test]
    fn strings_compare_case_folded() {
        let a = SortValue::Text("apple".to_string());
        let b = SortValue::Text("Banana".to_string());
        assert_eq!(compare_values(&a, &b, SortDirection::Ascending), Ordering::Less);
    }

    #[test]
    fn booleans_false_before_true() {
        let f = SortValue::Bool(false);
        let t = SortValue::Bool(true);
        assert_eq!(compare_values(&f, &t, SortDirection::Ascending), Ordering::Less);
    }

    #[test]
    fn mismatched_types_coerce_to_strings() {
        let n = SortValue::Number(5.0);
        let s = SortValue::Text("5".to_string());
        assert_eq!(compare_values(&n, &s, SortDirection::Ascending), Ordering::Equal);
    }
}
