use autofill_core_types::{ControlHandle, Document};

use crate::errors::SelectError;
use crate::model::SelectOutcome;
use crate::runner::execute;

/// Commits a dropdown choice from free text.
pub trait OptionSelector: Send + Sync {
    /// Pick the option matching `target`, assign it and fire `change`.
    /// Leaves the control untouched when nothing matches.
    fn select_by_text(
        &self,
        doc: &mut dyn Document,
        handle: ControlHandle,
        target: &str,
    ) -> Result<SelectOutcome, SelectError>;
}

/// Exact, then containment, then loose matching on the option text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextMatchSelector;

impl OptionSelector for TextMatchSelector {
    fn select_by_text(
        &self,
        doc: &mut dyn Document,
        handle: ControlHandle,
        target: &str,
    ) -> Result<SelectOutcome, SelectError> {
        execute(doc, handle, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchTier;
    use autofill_core_types::{DomEvent, MemoryControl, MemoryDocument};

    fn page() -> MemoryDocument {
        MemoryDocument::new("https://example.test/", "Form")
            .with_control(MemoryControl::select(
                "atlas_country",
                &[("-- Select --", ""), ("Japan", "JPN"), ("Jamaica", "JAM")],
            ))
            .with_control(MemoryControl::text("atlas_first_name"))
    }

    #[test]
    fn commits_value_and_fires_change() {
        let mut doc = page();
        let handle = doc.handle_of("atlas_country").unwrap();
        let outcome = TextMatchSelector::default()
            .select_by_text(&mut doc, handle, "japan")
            .unwrap();
        assert_eq!(outcome.value, "JPN");
        assert_eq!(outcome.tier, MatchTier::Exact);
        assert_eq!(doc.value_of("atlas_country"), Some("JPN"));
        assert_eq!(doc.events_for(handle), vec![DomEvent::Change]);
    }

    #[test]
    fn unmatched_target_leaves_control_untouched() {
        let mut doc = page();
        let handle = doc.handle_of("atlas_country").unwrap();
        let err = TextMatchSelector::default()
            .select_by_text(&mut doc, handle, "Kenya")
            .unwrap_err();
        assert_eq!(
            err,
            SelectError::OptionMissing {
                target: "Kenya".into()
            }
        );
        assert_eq!(doc.value_of("atlas_country"), Some(""));
        assert!(doc.events_for(handle).is_empty());
    }

    #[test]
    fn rejects_non_dropdown_controls() {
        let mut doc = page();
        let handle = doc.handle_of("atlas_first_name").unwrap();
        let err = TextMatchSelector::default()
            .select_by_text(&mut doc, handle, "Jane")
            .unwrap_err();
        assert_eq!(err, SelectError::NotSelection("text".into()));
    }
}
