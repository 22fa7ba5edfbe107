//! Structured error types for gridview.
//!
//! Configuration problems are rejected eagerly; steady-state interaction
//! code short-circuits instead of erroring.

/// All errors that can occur in gridview configuration and interaction.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid column configuration (duplicate key, zero width, ...).
    #[error("Invalid column config: {0}")]
    Config(String),

    /// A column key that is not present in the current configuration.
    #[error("Unknown column key: {0}")]
    UnknownColumn(String),

    /// Serialization failure at the JS boundary.
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
