//! Control lookup strategies
//!
//! Four strategies in fallback order:
//! 1. IdExact - `id` attribute equals the identifier
//! 2. NameExact - `name` attribute equals the identifier
//! 3. NameContains - `name` attribute contains the identifier
//! 4. IdContains - `id` attribute contains the identifier

use crate::types::LocatorStrategy;
use autofill_core_types::{ControlHandle, Document};

/// Strategy trait for control lookup
pub trait Strategy: Send + Sync {
    /// First control in document order matching this strategy
    fn find(&self, doc: &dyn Document, identifier: &str) -> Option<ControlHandle>;

    /// Get strategy type
    fn strategy_type(&self) -> LocatorStrategy;

    /// Get strategy name
    fn name(&self) -> &'static str {
        self.strategy_type().name()
    }
}

pub struct IdExactStrategy;

impl Strategy for IdExactStrategy {
    fn find(&self, doc: &dyn Document, identifier: &str) -> Option<ControlHandle> {
        doc.element_by_id(identifier)
    }

    fn strategy_type(&self) -> LocatorStrategy {
        LocatorStrategy::IdExact
    }
}

pub struct NameExactStrategy;

impl Strategy for NameExactStrategy {
    fn find(&self, doc: &dyn Document, identifier: &str) -> Option<ControlHandle> {
        doc.find_first(&|snapshot| snapshot.name == identifier)
    }

    fn strategy_type(&self) -> LocatorStrategy {
        LocatorStrategy::NameExact
    }
}

pub struct NameContainsStrategy;

impl Strategy for NameContainsStrategy {
    fn find(&self, doc: &dyn Document, identifier: &str) -> Option<ControlHandle> {
        doc.find_first(&|snapshot| snapshot.name.contains(identifier))
    }

    fn strategy_type(&self) -> LocatorStrategy {
        LocatorStrategy::NameContains
    }
}

pub struct IdContainsStrategy;

impl Strategy for IdContainsStrategy {
    fn find(&self, doc: &dyn Document, identifier: &str) -> Option<ControlHandle> {
        doc.find_first(&|snapshot| snapshot.id.contains(identifier))
    }

    fn strategy_type(&self) -> LocatorStrategy {
        LocatorStrategy::IdContains
    }
}

/// Build the boxed strategy for a chain entry
pub fn strategy_for(strategy: LocatorStrategy) -> Box<dyn Strategy> {
    match strategy {
        LocatorStrategy::IdExact => Box::new(IdExactStrategy),
        LocatorStrategy::NameExact => Box::new(NameExactStrategy),
        LocatorStrategy::NameContains => Box::new(NameContainsStrategy),
        LocatorStrategy::IdContains => Box::new(IdContainsStrategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofill_core_types::{MemoryControl, MemoryDocument};

    fn page() -> MemoryDocument {
        MemoryDocument::new("https://example.test/form", "Form")
            .with_control(MemoryControl::text("ctl00_atlas_first_name").with_name("first"))
            .with_control(MemoryControl::text("other").with_name("form$atlas_last_name"))
    }

    #[test]
    fn exact_strategies_require_full_match() {
        let doc = page();
        assert!(IdExactStrategy.find(&doc, "atlas_first_name").is_none());
        assert_eq!(
            NameExactStrategy.find(&doc, "first"),
            Some(ControlHandle(0))
        );
    }

    #[test]
    fn substring_strategies_recover_prefixed_attributes() {
        let doc = page();
        assert_eq!(
            IdContainsStrategy.find(&doc, "atlas_first_name"),
            Some(ControlHandle(0))
        );
        assert_eq!(
            NameContainsStrategy.find(&doc, "atlas_last_name"),
            Some(ControlHandle(1))
        );
    }

    #[test]
    fn test_locator_strategy() {
        assert_eq!(LocatorStrategy::IdExact.name(), "id");
        assert_eq!(LocatorStrategy::NameContains.name(), "name-contains");
        assert_eq!(strategy_for(LocatorStrategy::IdContains).name(), "id-contains");
    }

    #[test]
    fn test_fallback_chain() {
        let chain = LocatorStrategy::fallback_chain();
        assert_eq!(chain.len(), 4);
        assert_eq!(chain[0], LocatorStrategy::IdExact);
        assert_eq!(chain[1], LocatorStrategy::NameExact);
        assert_eq!(chain[2], LocatorStrategy::NameContains);
        assert_eq!(chain[3], LocatorStrategy::IdContains);
    }
}
