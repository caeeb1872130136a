//! Value writer: commits a value into a located control.

use std::sync::Arc;

use autofill_core_types::bag::as_text;
use autofill_core_types::{ControlHandle, ControlKind, Document, DomEvent, FillSession};
use field_locator::{ElementResolver, FieldLocator};
use serde_json::Value;
use tool_select_option::{OptionSelector, SelectError, TextMatchSelector};
use tracing::debug;

use crate::errors::WriteError;
use crate::model::{Applied, WriteOutcome};
use crate::{precheck, radio, redact};

pub struct ValueWriter {
    locator: Arc<dyn ElementResolver>,
    selector: Arc<dyn OptionSelector>,
}

impl ValueWriter {
    pub fn new() -> Self {
        Self {
            locator: Arc::new(FieldLocator::new()),
            selector: Arc::new(TextMatchSelector::default()),
        }
    }

    pub fn with_selector(mut self, selector: Arc<dyn OptionSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Write `value` into the control behind `identifier`, dispatching on the
    /// control's type.
    pub fn write(
        &self,
        doc: &mut dyn Document,
        session: &mut FillSession,
        identifier: &str,
        value: &Value,
    ) -> Result<WriteOutcome, WriteError> {
        if let Some(reason) = precheck::gate(session, identifier, value) {
            return Ok(WriteOutcome::Skipped(reason));
        }
        let resolution = self.locator.locate(doc, identifier)?;
        let text = as_text(value).unwrap_or_default();

        let applied = match resolution.snapshot.kind() {
            ControlKind::Selection => {
                Applied::Selection(self.commit_selection(doc, resolution.handle, identifier, &text)?)
            }
            ControlKind::Exclusive => return self.choose_radio(doc, session, identifier, value),
            ControlKind::Toggle => {
                let checked = wants_checked(value);
                doc.set_checked(resolution.handle, checked);
                doc.dispatch(resolution.handle, DomEvent::Change);
                Applied::Toggle { checked }
            }
            ControlKind::FreeText => {
                doc.set_value(resolution.handle, &text);
                doc.dispatch(resolution.handle, DomEvent::Input);
                doc.dispatch(resolution.handle, DomEvent::Change);
                Applied::Text { value: text }
            }
            ControlKind::Inert => {
                return Err(WriteError::NotWritable {
                    identifier: identifier.to_string(),
                    input_type: resolution.snapshot.input_type,
                })
            }
        };

        Ok(self.commit(session, identifier, applied))
    }

    /// Pick a dropdown option by display text. The control behind
    /// `identifier` must be a dropdown.
    pub fn select(
        &self,
        doc: &mut dyn Document,
        session: &mut FillSession,
        identifier: &str,
        value: &Value,
    ) -> Result<WriteOutcome, WriteError> {
        if let Some(reason) = precheck::gate(session, identifier, value) {
            return Ok(WriteOutcome::Skipped(reason));
        }
        let resolution = self.locator.locate(doc, identifier)?;
        if resolution.snapshot.kind() != ControlKind::Selection {
            return Err(WriteError::Select {
                identifier: identifier.to_string(),
                source: SelectError::NotSelection(resolution.snapshot.input_type),
            });
        }
        let text = as_text(value).unwrap_or_default();
        let outcome = self.commit_selection(doc, resolution.handle, identifier, &text)?;
        Ok(self.commit(session, identifier, Applied::Selection(outcome)))
    }

    /// Check the radio of `group` answering `value`, firing an activation and
    /// a change notification on it.
    pub fn choose_radio(
        &self,
        doc: &mut dyn Document,
        session: &mut FillSession,
        group: &str,
        value: &Value,
    ) -> Result<WriteOutcome, WriteError> {
        if let Some(reason) = precheck::gate(session, group, value) {
            return Ok(WriteOutcome::Skipped(reason));
        }
        let target = as_text(value).unwrap_or_default();
        let handle =
            radio::find_radio(doc, group, &target).ok_or_else(|| WriteError::RadioMissing {
                group: group.to_string(),
                target: target.clone(),
            })?;

        doc.set_checked(handle, true);
        doc.dispatch(handle, DomEvent::Click);
        doc.dispatch(handle, DomEvent::Change);
        let value = doc
            .snapshot(handle)
            .map(|snapshot| snapshot.value)
            .unwrap_or(target);
        Ok(self.commit(session, group, Applied::Radio { value }))
    }

    /// Tick the checkbox with this exact id when it is rendered. Returns
    /// whether it was ticked.
    pub fn tick_checkbox(&self, doc: &mut dyn Document, element_id: &str) -> bool {
        let Some(handle) = doc.element_by_id(element_id) else {
            return false;
        };
        let rendered = doc
            .snapshot(handle)
            .map(|snapshot| snapshot.visible && snapshot.kind() == ControlKind::Toggle)
            .unwrap_or(false);
        if !rendered {
            return false;
        }
        doc.set_checked(handle, true);
        doc.dispatch(handle, DomEvent::Change);
        debug!(element_id, "ticked checkbox");
        true
    }

    /// Check the first radio on the page carrying exactly `value`.
    pub fn check_radio_with_value(&self, doc: &mut dyn Document, value: &str) -> bool {
        let Some(handle) = radio::find_radio_with_value(doc, value) else {
            return false;
        };
        doc.set_checked(handle, true);
        doc.dispatch(handle, DomEvent::Change);
        debug!(value, "checked radio option");
        true
    }

    fn commit_selection(
        &self,
        doc: &mut dyn Document,
        handle: ControlHandle,
        identifier: &str,
        text: &str,
    ) -> Result<tool_select_option::SelectOutcome, WriteError> {
        self.selector
            .select_by_text(doc, handle, text)
            .map_err(|source| WriteError::Select {
                identifier: identifier.to_string(),
                source,
            })
    }

    fn commit(&self, session: &mut FillSession, identifier: &str, applied: Applied) -> WriteOutcome {
        session.mark_filled(identifier);
        let shown = match &applied {
            Applied::Text { value } | Applied::Radio { value } => redact::value(identifier, value),
            Applied::Toggle { checked } => checked.to_string(),
            Applied::Selection(outcome) => redact::value(identifier, &outcome.value),
        };
        debug!(identifier, value = %shown, "filled field");
        WriteOutcome::Applied {
            identifier: identifier.to_string(),
            applied,
        }
    }
}

impl Default for ValueWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Checkbox truthiness: boolean `true` or the strings `yes` / `Y`.
pub fn wants_checked(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "yes" || s == "Y",
        _ => false,
    }
}
