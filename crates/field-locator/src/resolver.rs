//! Field resolver with fallback chain orchestration

use crate::{errors::LocatorError, strategies::*, types::*};
use autofill_core_types::Document;
use tracing::debug;

/// Element resolver trait
pub trait ElementResolver: Send + Sync {
    /// Resolve a field identifier to a visible control
    fn locate(&self, doc: &dyn Document, identifier: &str) -> Result<Resolution, LocatorError>;
}

/// Default resolver walking the id/name fallback chain
pub struct FieldLocator {
    strategies: Vec<Box<dyn Strategy>>,
}

impl FieldLocator {
    /// Create a resolver with the standard chain
    pub fn new() -> Self {
        Self::with_chain(LocatorStrategy::fallback_chain())
    }

    /// Create a resolver with a custom chain order
    pub fn with_chain(chain: Vec<LocatorStrategy>) -> Self {
        Self {
            strategies: chain.into_iter().map(strategy_for).collect(),
        }
    }
}

impl Default for FieldLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementResolver for FieldLocator {
    fn locate(&self, doc: &dyn Document, identifier: &str) -> Result<Resolution, LocatorError> {
        if identifier.is_empty() {
            return Err(LocatorError::EmptyIdentifier);
        }

        for strategy in &self.strategies {
            let Some(handle) = strategy.find(doc, identifier) else {
                continue;
            };

            // First hit is final; a hidden control does not fall through.
            let snapshot = doc
                .snapshot(handle)
                .ok_or_else(|| LocatorError::Stale(identifier.to_string()))?;
            if !snapshot.visible {
                debug!(
                    identifier,
                    strategy = strategy.name(),
                    "matched control is not rendered"
                );
                return Err(LocatorError::Hidden {
                    identifier: identifier.to_string(),
                    strategy: strategy.name().to_string(),
                });
            }

            debug!(identifier, strategy = strategy.name(), "located field");
            return Ok(Resolution {
                identifier: identifier.to_string(),
                handle,
                strategy: strategy.strategy_type(),
                snapshot,
            });
        }

        Err(LocatorError::NotFound(identifier.to_string()))
    }
}
