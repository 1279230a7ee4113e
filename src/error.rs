//! Setup-time errors
//!
//! The simulation tick never fails; everything that can go wrong happens
//! while the adapter is wiring up bindings and settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// A scene object the core needs was not supplied by the host
    #[error("missing host binding: {0}")]
    MissingBinding(&'static str),

    /// A tuning value is out of its usable range
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SetupError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SetupError::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}
