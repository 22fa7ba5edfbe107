//! Interaction state: column visibility transitions, row selection, and
//! single-column sort.

mod selection;
mod sort;
mod visibility;

pub use selection::SelectionState;
pub use sort::{compare_values, SortDirection, SortState, SortValue};
pub use visibility::{ChangeAction, ColumnChange, ColumnPhase, VisibilityState};
