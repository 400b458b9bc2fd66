//! Error types for chart spec loading.
//!
//! Rendering itself never fails; only configuration input is fallible.

use thiserror::Error;

/// Errors raised while loading or validating a [`ChartSpec`](crate::ChartSpec).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The spec file is not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The spec file is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The spec file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field holds a value outside its allowed domain.
    #[error("invalid value for `{field}`: {message}")]
    InvalidValue {
        field: String,
        message: String,
    },

    /// The named palette does not exist.
    #[error("unknown palette `{0}`")]
    UnknownPalette(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
