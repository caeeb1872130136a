//! Radio-group matching.

use autofill_core_types::{ControlHandle, Document};

/// Whether a radio carrying `radio_value` answers `target`.
///
/// Case-insensitive equality, plus the `yes`/`no` to `Y`/`N` shorthand the
/// scheduling pages use for their boolean questions.
pub fn radio_value_matches(radio_value: &str, target: &str) -> bool {
    radio_value == target
        || radio_value.to_lowercase() == target.to_lowercase()
        || (target == "yes" && radio_value == "Y")
        || (target == "no" && radio_value == "N")
}

/// First visible radio of `group` (name equal to or containing the group
/// identifier) whose value answers `target`.
pub fn find_radio(doc: &dyn Document, group: &str, target: &str) -> Option<ControlHandle> {
    if group.is_empty() {
        return None;
    }
    doc.find_first(&|snapshot| {
        snapshot.input_type == "radio"
            && snapshot.visible
            && snapshot.name.contains(group)
            && radio_value_matches(&snapshot.value, target)
    })
}

/// First radio anywhere on the page carrying exactly `value`.
pub fn find_radio_with_value(doc: &dyn Document, value: &str) -> Option<ControlHandle> {
    doc.find_first(&|snapshot| snapshot.input_type == "radio" && snapshot.value == value)
}
