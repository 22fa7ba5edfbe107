//! Column configuration as supplied by the host.
//!
//! The host owns the column list and mutates it only through the reorder
//! and visibility callbacks this engine emits. Configs are validated once
//! on the way in; duplicate or zero-width keys are configuration errors,
//! never guessed around at drag time.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Host-supplied configuration for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Unique key identifying the column across reorders and toggles.
    pub key: String,
    /// Header label (also shown on the floating drag clone).
    #[serde(default)]
    pub label: String,
    /// Base width in pixels.
    pub width: f32,
    /// Lower bound for the grid track, defaults to `width`.
    #[serde(default)]
    pub min_width: Option<f32>,
    /// Upper bound for sticky tracks; sticky columns without it are fixed-width.
    #[serde(default)]
    pub max_width: Option<f32>,
    /// Flex ratio for scrollable tracks, defaults to 1.
    #[serde(default)]
    pub flex_ratio: Option<f32>,
    /// Pinned to a fixed horizontal position regardless of scroll.
    #[serde(default)]
    pub is_sticky: bool,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub sortable: bool,
}

impl ColumnConfig {
    /// Create a config with the given key and width; remaining fields default.
    pub fn new(key: impl Into<String>, width: f32) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            width,
            min_width: None,
            max_width: None,
            flex_ratio: None,
            is_sticky: false,
            align: Align::Left,
            sortable: false,
        }
    }

    /// Whether this column participates in drag reorder.
    ///
    /// Sticky columns are excluded; the selection-checkbox column is
    /// excluded by the viewer via its reserved key.
    pub fn is_draggable(&self) -> bool {
        !self.is_sticky
    }
}

/// Validate a host-supplied column list.
///
/// # Errors
/// Returns `GridError::Config` for duplicate keys, non-positive widths,
/// inverted min/max bounds, or non-positive flex ratios.
pub fn validate_columns(columns: &[ColumnConfig]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for col in columns {
        if col.key.is_empty() {
            return Err(GridError::Config("empty column key".to_string()));
        }
        if !seen.insert(col.key.as_str()) {
            return Err(GridError::Config(format!("duplicate column key: {}", col.key)));
        }
        if !(col.width > 0.0) {
            return Err(GridError::Config(format!(
                "column {} has non-positive width {}",
                col.key, col.width
            )));
        }
        if let (Some(min), Some(max)) = (col.min_width, col.max_width) {
            if min > max {
                return Err(GridError::Config(format!(
                    "column {} has min_width {} > max_width {}",
                    col.key, min, max
                )));
            }
        }
        if let Some(ratio) = col.flex_ratio {
            if !(ratio > 0.0) {
                return Err(GridError::Config(format!(
                    "column {} has non-positive flex_ratio {}",
                    col.key, ratio
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_columns() {
        let cols = vec![ColumnConfig::new("a", 80.0), ColumnConfig::new("b", 120.0)];
        assert!(validate_columns(&cols).is_ok());
    }

    #[test]
    fn rejects_duplicate_keys() {
        let cols = vec![ColumnConfig::new("a", 80.0), ColumnConfig::new("a", 120.0)];
        assert!(validate_columns(&cols).is_err());
    }

    #[test]
    fn rejects_zero_width() {
        let cols = vec![ColumnConfig::new("a", 0.0)];
        assert!(validate_columns(&cols).is_err());
    }

    #[test]
    fn rejects_nan_width() {
        let cols = vec![ColumnConfig::new("a", f32::NAN)];
        assert!(validate_columns(&cols).is_err());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut col = ColumnConfig::new("a", 80.0);
        col.min_width = Some(100.0);
        col.max_width = Some(50.0);
        assert!(validate_columns(&[col]).is_err());
    }
}
