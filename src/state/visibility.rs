//! Column visibility transitions.
//!
//! Each column moves through a small phase machine — Hidden, Entering,
//! Settled, Leaving — driven by user toggles, an externally pushed desired
//! set, or reset-to-default. All three paths funnel through the same diff
//! logic so they share one animation path. Leaving columns drop out of the
//! visible set immediately but stay tracked (with their captured last
//! rect) until the leave animation finishes and `finish_leave` commits the
//! DOM removal.

use std::collections::{HashMap, HashSet};

use crate::layout::ColumnRect;

/// What happened to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Added,
    Removed,
}

/// The single most-recent visibility event, gating one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChange {
    pub column_key: String,
    pub action: ChangeAction,
    pub timestamp: f64,
}

/// Animation phase of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPhase {
    Hidden,
    Entering,
    Settled,
    Leaving,
}

/// Visible/entering/leaving tracking over an ordered key universe.
#[derive(Debug, Clone, Default)]
pub struct VisibilityState {
    /// Full ordered universe of column keys (host column order).
    order: Vec<String>,
    visible: HashSet<String>,
    /// Leaving key -> last known rect, for the removal overlay.
    leaving: HashMap<String, Option<ColumnRect>>,
    entering: HashSet<String>,
    last_change: Option<ColumnChange>,
}

impl VisibilityState {
    /// All columns initially visible and settled.
    pub fn new(order: Vec<String>) -> Self {
        let visible = order.iter().cloned().collect();
        Self {
            order,
            visible,
            leaving: HashMap::new(),
            entering: HashSet::new(),
            last_change: None,
        }
    }

    /// Replace the key universe after a host reorder or column-set change.
    /// Visibility of surviving keys is preserved; new keys start visible.
    pub fn set_order(&mut self, order: Vec<String>) {
        for key in &order {
            if !self.order.contains(key) {
                self.visible.insert(key.clone());
            }
        }
        self.visible.retain(|k| order.contains(k));
        self.leaving.retain(|k, _| order.contains(k));
        self.entering.retain(|k| order.contains(k));
        self.order = order;
    }

    /// Currently-visible keys in column order.
    pub fn visible_keys(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|k| self.visible.contains(*k))
            .cloned()
            .collect()
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    pub fn leaving_keys(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|k| self.leaving.contains_key(*k))
            .cloned()
            .collect()
    }

    pub fn entering_keys(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|k| self.entering.contains(*k))
            .cloned()
            .collect()
    }

    /// Last known rect of a leaving column, if one was captured.
    pub fn leaving_rect(&self, key: &str) -> Option<ColumnRect> {
        self.leaving.get(key).copied().flatten()
    }

    /// Record the rect a leaving column should overlay at. No-op for keys
    /// that are not currently leaving.
    pub fn set_leaving_rect(&mut self, key: &str, rect: ColumnRect) {
        if let Some(slot) = self.leaving.get_mut(key) {
            *slot = Some(rect);
        }
    }

    pub fn phase(&self, key: &str) -> ColumnPhase {
        if self.leaving.contains_key(key) {
            ColumnPhase::Leaving
        } else if self.entering.contains(key) {
            ColumnPhase::Entering
        } else if self.visible.contains(key) {
            ColumnPhase::Settled
        } else {
            ColumnPhase::Hidden
        }
    }

    pub fn last_change(&self) -> Option<&ColumnChange> {
        self.last_change.as_ref()
    }

    /// Toggle one column. Returns the action taken, or `None` for keys
    /// outside the universe (stale toggles are ignored, not errors).
    ///
    /// Hiding moves the key out of the visible set and into the leaving
    /// set immediately; the caller schedules `finish_leave` after the
    /// leave duration. Showing a leaving key cancels the leave (rapid
    /// re-toggle) and re-enters through the entering set.
    pub fn toggle(&mut self, key: &str, now: f64) -> Option<ChangeAction> {
        if !self.order.iter().any(|k| k == key) {
            return None;
        }
        let action = if self.visible.contains(key) {
            self.visible.remove(key);
            self.entering.remove(key);
            self.leaving.insert(key.to_string(), None);
            ChangeAction::Removed
        } else {
            self.leaving.remove(key);
            self.visible.insert(key.to_string());
            self.entering.insert(key.to_string());
            ChangeAction::Added
        };
        self.last_change = Some(ColumnChange {
            column_key: key.to_string(),
            action,
            timestamp: now,
        });
        Some(action)
    }

    /// Diff an externally pushed desired visible-set against current state
    /// and derive the same entering/leaving transitions a user toggle
    /// would. Returns the changes so the caller can schedule timers.
    /// Reset-to-default is this with the default set.
    pub fn apply_desired(&mut self, desired: &[String], now: f64) -> Vec<(String, ChangeAction)> {
        let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();
        let mut changes = Vec::new();

        let keys: Vec<String> = self.order.clone();
        for key in keys {
            let want = desired_set.contains(key.as_str());
            let have = self.visible.contains(&key);
            if want != have {
                if let Some(action) = self.toggle(&key, now) {
                    changes.push((key, action));
                }
            } else if want && self.leaving.contains_key(&key) {
                // Desired visible while a leave is still animating: cancel it.
                self.leaving.remove(&key);
            }
        }
        changes
    }

    /// Commit a finished leave: the column's DOM can now be removed.
    /// Idempotent — clearing an already-cleared key is safe.
    pub fn finish_leave(&mut self, key: &str) {
        self.leaving.remove(key);
    }

    /// Settle a finished enter animation. Idempotent.
    pub fn finish_enter(&mut self, key: &str) {
        self.entering.remove(key);
    }
}
