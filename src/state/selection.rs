//! Row selection state.
//!
//! Holds the set of selected row ids. Derived flags are always computed
//! against the currently-rendered row-id list, never a historical
//! superset. Hosts with the feature disabled hold `Option::None` instead
//! of a flag branch at every call site.

use std::collections::HashSet;

/// Set of selected row ids plus derived all/some flags.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: HashSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selected.contains(row_id)
    }

    /// Toggle one row. Returns the row's new selected state.
    pub fn toggle_row(&mut self, row_id: &str) -> bool {
        if self.selected.remove(row_id) {
            false
        } else {
            self.selected.insert(row_id.to_string());
            true
        }
    }

    /// Select every currently-rendered row.
    pub fn select_all(&mut self, row_ids: &[String]) {
        self.selected.extend(row_ids.iter().cloned());
    }

    /// Clear the selection entirely.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Drop ids that no longer appear in the rendered row list.
    pub fn retain_rows(&mut self, row_ids: &[String]) {
        let current: HashSet<&str> = row_ids.iter().map(String::as_str).collect();
        self.selected.retain(|id| current.contains(id.as_str()));
    }

    /// Count of selected ids among the currently-rendered rows.
    pub fn selected_count(&self, row_ids: &[String]) -> usize {
        row_ids.iter().filter(|id| self.selected.contains(*id)).count()
    }

    /// True iff every rendered row is selected; false for an empty list.
    pub fn is_all_selected(&self, row_ids: &[String]) -> bool {
        !row_ids.is_empty() && row_ids.iter().all(|id| self.selected.contains(id))
    }

    /// True iff at least one but not all rendered rows are selected.
    pub fn is_some_selected(&self, row_ids: &[String]) -> bool {
        let count = self.selected_count(row_ids);
        count > 0 && count < row_ids.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn partial_selection_flags() {
        let rows = ids(&["1", "2", "3"]);
        let mut sel = SelectionState::new();
        sel.toggle_row("1");
        sel.toggle_row("3");
        assert!(sel.is_some_selected(&rows));
        assert!(!sel.is_all_selected(&rows));
        assert_eq!(sel.selected_count(&rows), 2);
    }

    #[test]
    fn all_selected_requires_nonempty_rows() {
        let sel = SelectionState::new();
        assert!(!sel.is_all_selected(&[]));
        assert!(!sel.is_some_selected(&[]));
    }

    #[test]
    fn select_all_uses_current_rows() {
        let mut sel = SelectionState::new();
        sel.select_all(&ids(&["1", "2"]));
        assert!(sel.is_all_selected(&ids(&["1", "2"])));
        // A new row appears: no longer all-selected
        assert!(!sel.is_all_selected(&ids(&["1", "2", "3"])));
        assert!(sel.is_some_selected(&ids(&["1", "2", "3"])));
    }

    #[test]
    fn stale_ids_do_not_count() {
        let mut sel = SelectionState::new();
        sel.select_all(&ids(&["1", "2"]));
        let rows = ids(&["2", "3"]);
        assert_eq!(sel.selected_count(&rows), 1);
        sel.retain_rows(&rows);
        assert!(!sel.is_selected("1"));
        assert!(sel.is_selected("2"));
    }

    #[test]
    fn deselect_all_clears() {
        let mut sel = SelectionState::new();
        sel.select_all(&ids(&["1", "2"]));
        sel.deselect_all();
        assert_eq!(sel.selected_count(&ids(&["1", "2"])), 0);
    }
}
