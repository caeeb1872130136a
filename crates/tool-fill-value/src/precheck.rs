use autofill_core_types::bag::is_truthy;
use autofill_core_types::FillSession;
use serde_json::Value;

use crate::model::SkipReason;

/// Gate shared by every write path: falsy values and identifiers already
/// committed in this pass never reach the page.
pub(crate) fn gate(session: &FillSession, identifier: &str, value: &Value) -> Option<SkipReason> {
    if !is_truthy(value) {
        return Some(SkipReason::EmptyValue);
    }
    if session.is_filled(identifier) {
        return Some(SkipReason::AlreadyFilled);
    }
    None
}
