//! Core types for the locator

use autofill_core_types::{ControlHandle, ControlSnapshot};

/// Locator strategy enumeration, in fallback order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocatorStrategy {
    /// `getElementById`
    IdExact,

    /// `[name="..."]`
    NameExact,

    /// `[name*="..."]`
    NameContains,

    /// `[id*="..."]`
    IdContains,
}

impl LocatorStrategy {
    /// Get strategy name as string
    pub fn name(&self) -> &'static str {
        match self {
            LocatorStrategy::IdExact => "id",
            LocatorStrategy::NameExact => "name",
            LocatorStrategy::NameContains => "name-contains",
            LocatorStrategy::IdContains => "id-contains",
        }
    }

    /// Get all strategies in fallback order
    pub fn fallback_chain() -> Vec<LocatorStrategy> {
        vec![
            LocatorStrategy::IdExact,
            LocatorStrategy::NameExact,
            LocatorStrategy::NameContains,
            LocatorStrategy::IdContains,
        ]
    }
}

/// A located, visible control
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Identifier the caller asked for
    pub identifier: String,

    /// Handle of the matched control
    pub handle: ControlHandle,

    /// Strategy that produced the hit
    pub strategy: LocatorStrategy,

    /// Control state at resolution time
    pub snapshot: ControlSnapshot,
}
