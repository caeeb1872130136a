//! Error types for the locator

use thiserror::Error;

/// Locator error enumeration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// Identifier was empty
    #[error("Empty field identifier")]
    EmptyIdentifier,

    /// No strategy produced a control
    #[error("Field not found: {0}")]
    NotFound(String),

    /// A control matched but has no rendering box
    #[error("Field '{identifier}' matched by {strategy} but is not visible")]
    Hidden { identifier: String, strategy: String },

    /// The document dropped the control between lookup and snapshot
    #[error("Control vanished while resolving: {0}")]
    Stale(String),
}

impl LocatorError {
    /// Every locator failure is a silent, per-field miss
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LocatorError::NotFound(_) | LocatorError::Hidden { .. } | LocatorError::Stale(_)
        )
    }
}
