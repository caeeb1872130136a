//! Form-fill orchestrator.
//!
//! A fill pass picks a regime from the bag and the page label, walks the
//! resulting steps in order and isolates failures per field: a miss is logged
//! and the pass moves on. Each pass owns a fresh [`FillSession`].

mod dependents;
mod generic;
pub mod plans;

use std::sync::Arc;

use autofill_core_types::bag::{is_truthy, lookup};
use autofill_core_types::{Document, FillPassId, FillSession, PageLabel, ValueBag};
use serde::Serialize;
use serde_json::Value;
use tool_fill_value::{ValueWriter, WriteError, WriteOutcome};
use tracing::{debug, info, instrument, warn};

use crate::classifier;
use crate::config::FillerConfig;
use crate::language;
use crate::roster::DependentRecord;

pub use dependents::DependentPage;
pub use plans::{Source, Step};

/// How the fields of a pass were chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Namespaced bag: every scalar key is written by name.
    Flat,
    /// Legacy bag on a page with a field table.
    PageSpecific,
    /// Legacy bag on a page without a table: keys are written by name.
    Generic,
    Dependent(DependentPage),
}

/// Outcome of one fill pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillReport {
    pub pass_id: FillPassId,
    pub page: PageLabel,
    pub regime: Regime,
    /// Identifiers committed in this pass, in commit order.
    pub filled: Vec<String>,
    /// Fields skipped because no control or option matched.
    pub misses: usize,
}

impl FillReport {
    fn from_session(session: FillSession, page: PageLabel, regime: Regime) -> Self {
        let (pass_id, filled, misses) = session.into_parts();
        Self {
            pass_id,
            page,
            regime,
            filled,
            misses,
        }
    }

    pub fn filled_count(&self) -> usize {
        self.filled.len()
    }

    pub fn is_filled(&self, identifier: &str) -> bool {
        self.filled.iter().any(|filled| filled == identifier)
    }
}

pub struct FormFiller {
    config: Arc<FillerConfig>,
    writer: ValueWriter,
}

impl FormFiller {
    pub fn new(config: Arc<FillerConfig>) -> Self {
        Self {
            config,
            writer: ValueWriter::new(),
        }
    }

    pub fn with_writer(mut self, writer: ValueWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn config(&self) -> &FillerConfig {
        &self.config
    }

    /// Fill the page from `bag`. Never fails; per-field misses end up in the
    /// report and the log.
    #[instrument(skip_all, fields(page = %label))]
    pub fn fill(&self, doc: &mut dyn Document, label: PageLabel, bag: &ValueBag) -> FillReport {
        let mut session = FillSession::new();
        let regime = if self.config.is_flat_bag(bag) {
            self.walk_flat(doc, &mut session, label, bag);
            Regime::Flat
        } else if let Some(plan) = plans::plan_for(label) {
            self.run_steps(doc, &mut session, plan, bag);
            Regime::PageSpecific
        } else {
            self.walk_flat(doc, &mut session, label, bag);
            Regime::Generic
        };

        info!(
            pass = %session.pass_id(),
            ?regime,
            filled = session.len(),
            misses = session.misses(),
            "form fill complete"
        );
        FillReport::from_session(session, label, regime)
    }

    /// Fill a dependent-management page from one dependent's values. The table
    /// is chosen from the page URL and title.
    #[instrument(skip_all, fields(dependent = %record.id))]
    pub fn fill_dependent(&self, doc: &mut dyn Document, record: &DependentRecord) -> FillReport {
        let url = doc.url();
        let title = doc.title();
        let page = DependentPage::route(&url, &title);
        debug!(name = %record.display_name, ?page, "filling dependent");

        let mut session = FillSession::new();
        self.run_steps(doc, &mut session, page.steps(), &record.values);

        let regime = Regime::Dependent(page);
        info!(
            pass = %session.pass_id(),
            ?regime,
            filled = session.len(),
            misses = session.misses(),
            "dependent fill complete"
        );
        FillReport::from_session(session, classifier::classify(&url, &title), regime)
    }

    fn run_steps(
        &self,
        doc: &mut dyn Document,
        session: &mut FillSession,
        steps: &[Step],
        bag: &ValueBag,
    ) {
        for step in steps {
            self.run_step(doc, session, step, bag);
        }
    }

    fn run_step(&self, doc: &mut dyn Document, session: &mut FillSession, step: &Step, bag: &ValueBag) {
        match *step {
            Step::Text { id, source } => {
                if let Some(value) = source.resolve(bag) {
                    let result = self.writer.write(doc, session, id, &value);
                    settle(session, id, result);
                }
            }
            Step::Select { id, source } => {
                if let Some(value) = source.resolve(bag) {
                    let result = self.writer.select(doc, session, id, &value);
                    settle(session, id, result);
                }
            }
            Step::Radio { group, source } => {
                if let Some(value) = source.resolve(bag) {
                    let result = self.writer.choose_radio(doc, session, group, &value);
                    settle(session, group, result);
                }
            }
            Step::Language { id, path, fallback } => {
                let value = lookup(bag, path);
                if !fallback && !value.map(is_truthy).unwrap_or(false) {
                    return;
                }
                self.select_language(doc, session, id, value);
            }
            Step::Consent {
                checkbox_id,
                decline_key,
            } => {
                if bag.get(decline_key) == Some(&Value::Bool(false)) {
                    debug!(checkbox_id, "consent declined");
                } else if self.writer.tick_checkbox(doc, checkbox_id) {
                    session.mark_filled(checkbox_id);
                }
            }
            Step::PreferRadio { value } => {
                if !self.writer.check_radio_with_value(doc, value) {
                    debug!(value, "no radio option carries the preferred value");
                }
            }
        }
    }

    fn select_language(
        &self,
        doc: &mut dyn Document,
        session: &mut FillSession,
        id: &str,
        value: Option<&Value>,
    ) {
        let label = language::normalize_value(value);
        debug!(id, label = %label, "mapped preferred language");
        let result = self.writer.select(doc, session, id, &Value::String(label));
        settle(session, id, result);
    }
}

/// Swallow a per-field failure after logging it.
fn settle(session: &mut FillSession, identifier: &str, result: Result<WriteOutcome, WriteError>) {
    match result {
        Ok(WriteOutcome::Applied { .. }) => {}
        Ok(WriteOutcome::Skipped(reason)) => debug!(identifier, ?reason, "field skipped"),
        Err(err) if err.is_not_found() => {
            session.record_miss();
            debug!(identifier, error = %err, "field not found");
        }
        Err(err) => warn!(identifier, error = %err, "field rejected value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofill_core_types::{ControlHandle, DomEvent, MemoryControl, MemoryDocument};
    use serde_json::json;
    use tool_select_option::{MatchTier, OptionSelector, SelectError, SelectOutcome};

    fn filler() -> FormFiller {
        FormFiller::new(Arc::new(FillerConfig::default()))
    }

    fn bag(value: Value) -> ValueBag {
        value.as_object().cloned().unwrap()
    }

    fn payment_page() -> MemoryDocument {
        MemoryDocument::new("https://www.ayobaspremium.jp/pay", "Ayobas Premium")
            .with_control(MemoryControl::text("name_first"))
            .with_control(MemoryControl::text("name_last"))
            .with_control(MemoryControl::text("phone"))
            .with_control(MemoryControl::checkbox("ckb_policy"))
            .with_control(MemoryControl::checkbox("chbx_confirm"))
    }

    #[test]
    fn namespaced_bag_selects_flat_regime() {
        let mut doc = MemoryDocument::new("https://example.test/x", "X")
            .with_control(MemoryControl::text("atlas_first_name"));
        let report = filler().fill(
            &mut doc,
            PageLabel::Payment,
            &bag(json!({"atlas_first_name": "Jane"})),
        );
        assert_eq!(report.regime, Regime::Flat);
        assert_eq!(report.filled, ["atlas_first_name"]);
    }

    /// Commits the first option carrying a value, whatever the target.
    struct FirstOption;

    impl OptionSelector for FirstOption {
        fn select_by_text(
            &self,
            doc: &mut dyn Document,
            handle: ControlHandle,
            _target: &str,
        ) -> Result<SelectOutcome, SelectError> {
            let first = doc
                .options(handle)
                .into_iter()
                .find(|option| !option.value.is_empty())
                .ok_or(SelectError::OptionMissing {
                    target: String::new(),
                })?;
            doc.set_value(handle, &first.value);
            doc.dispatch(handle, DomEvent::Change);
            Ok(SelectOutcome {
                value: first.value,
                text: first.text,
                tier: MatchTier::Loose,
            })
        }
    }

    #[test]
    fn dropdowns_go_through_the_configured_selector() {
        let page = || {
            MemoryDocument::new("https://example.test/x", "X").with_control(MemoryControl::select(
                "atlas_nationality",
                &[("Select", ""), ("Japan", "JP"), ("Kenya", "KE")],
            ))
        };
        let data = bag(json!({"atlas_nationality": "Atlantis"}));

        let mut doc = page();
        let report = filler().fill(&mut doc, PageLabel::Unknown, &data);
        assert_eq!(report.misses, 1);
        assert_eq!(doc.value_of("atlas_nationality"), Some(""));

        let mut doc = page();
        let custom = filler().with_writer(ValueWriter::new().with_selector(Arc::new(FirstOption)));
        let report = custom.fill(&mut doc, PageLabel::Unknown, &data);
        assert_eq!(report.filled, ["atlas_nationality"]);
        assert_eq!(doc.value_of("atlas_nationality"), Some("JP"));
    }

    #[test]
    fn unwritable_control_is_rejected_not_missed() {
        let mut doc = MemoryDocument::new("https://example.test/x", "X")
            .with_control(MemoryControl::typed("submit", "atlas_submit"))
            .with_control(MemoryControl::text("atlas_city"));
        let data = bag(json!({"atlas_submit": "go", "atlas_city": "Osaka"}));
        let report = filler().fill(&mut doc, PageLabel::Unknown, &data);
        assert_eq!(report.misses, 0);
        assert_eq!(report.filled, ["atlas_city"]);
        assert!(doc.events_for(ControlHandle(0)).is_empty());
    }

    #[test]
    fn payment_plan_uses_fallback_chain_and_consent() {
        let mut doc = payment_page();
        let data = bag(json!({
            "firstname": "Jane",
            "name_last": "Doe",
            "confirm_details": false
        }));
        let report = filler().fill(&mut doc, PageLabel::Payment, &data);
        assert_eq!(report.regime, Regime::PageSpecific);
        assert_eq!(doc.value_of("name_first"), Some("Jane"));
        assert_eq!(doc.value_of("name_last"), Some("Doe"));
        assert!(doc.is_checked(ControlHandle(3)));
        assert!(!doc.is_checked(ControlHandle(4)));
        assert_eq!(report.filled, ["name_first", "name_last", "ckb_policy"]);
    }

    #[test]
    fn missing_fields_are_counted_and_do_not_abort() {
        let mut doc = MemoryDocument::new("https://example.test/passport", "Passport")
            .with_control(MemoryControl::text("passport_issue_city"));
        let data = bag(json!({
            "passport": {"number": "X123", "issuingCountry": "Japan", "issueCity": "Tokyo"}
        }));
        let report = filler().fill(&mut doc, PageLabel::Passport, &data);
        assert_eq!(report.filled, ["passport_issue_city"]);
        assert_eq!(report.misses, 2);
        assert_eq!(doc.value_of("passport_issue_city"), Some("Tokyo"));
    }

    #[test]
    fn travel_radio_answers_no_when_flag_is_falsy() {
        let mut doc = MemoryDocument::new("https://example.test/travel", "Travel")
            .with_control(MemoryControl::radio("previous_us_travel", "Y"))
            .with_control(MemoryControl::radio("previous_us_travel", "N"))
            .with_control(MemoryControl::text("previous_visa_number"));
        let data = bag(json!({"previousUSTravel": 0, "previousVisaNumber": "V1"}));
        let report = filler().fill(&mut doc, PageLabel::TravelInfo, &data);
        assert!(doc.is_checked(ControlHandle(1)));
        assert!(!doc.is_checked(ControlHandle(0)));
        assert_eq!(doc.value_of("previous_visa_number"), Some(""));
        assert_eq!(report.filled, ["previous_us_travel"]);
    }

    #[test]
    fn document_delivery_prefers_premium_and_defaults_country() {
        let mut doc = MemoryDocument::new("https://example.test/document_delivery", "")
            .with_control(MemoryControl::select(
                "document_delivery_country",
                &[("Select", ""), ("Japan", "JP")],
            ))
            .with_control(MemoryControl::radio("delivery", "standard"))
            .with_control(MemoryControl::radio("delivery", "premium"));
        let report = filler().fill(&mut doc, PageLabel::DocumentDelivery, &ValueBag::new());
        assert_eq!(doc.value_of("document_delivery_country"), Some("JP"));
        assert!(doc.is_checked(ControlHandle(2)));
        assert_eq!(doc.events_for(ControlHandle(2)), vec![DomEvent::Change]);
        assert_eq!(report.filled, ["document_delivery_country"]);
    }

    #[test]
    fn appointment_falls_back_to_generic_walk() {
        let mut doc = MemoryDocument::new("https://example.test/schedule", "Appointment")
            .with_control(MemoryControl::text("city"));
        let report = filler().fill(
            &mut doc,
            PageLabel::Appointment,
            &bag(json!({"city": "Osaka"})),
        );
        assert_eq!(report.regime, Regime::Generic);
        assert_eq!(doc.value_of("city"), Some("Osaka"));
    }

    #[test]
    fn every_pass_starts_with_a_fresh_session() {
        let data = bag(json!({"atlas_first_name": "Jane"}));
        let filler = filler();
        let mut doc = MemoryDocument::new("https://example.test/x", "X")
            .with_control(MemoryControl::text("atlas_first_name"));
        let first = filler.fill(&mut doc, PageLabel::Unknown, &data);
        let second = filler.fill(&mut doc, PageLabel::Unknown, &data);
        assert_ne!(first.pass_id, second.pass_id);
        assert_eq!(second.filled, ["atlas_first_name"]);
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let mut doc = MemoryDocument::new("https://example.test/x", "X");
        let report = filler().fill(&mut doc, PageLabel::Unknown, &ValueBag::new());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["page"], json!("unknown"));
        assert_eq!(value["regime"], json!("generic"));
        assert!(value.get("passId").is_some());
    }
}
