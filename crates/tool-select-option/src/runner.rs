use autofill_core_types::{ControlHandle, ControlKind, Document, DomEvent};
use tracing::{debug, instrument};

use crate::errors::SelectError;
use crate::matcher::match_option;
use crate::model::SelectOutcome;

#[instrument(skip_all, fields(handle = handle.0, wanted = target))]
pub(crate) fn execute(
    doc: &mut dyn Document,
    handle: ControlHandle,
    target: &str,
) -> Result<SelectOutcome, SelectError> {
    let snapshot = doc.snapshot(handle).ok_or(SelectError::Stale)?;
    if snapshot.kind() != ControlKind::Selection {
        return Err(SelectError::NotSelection(snapshot.input_type));
    }

    let options = doc.options(handle);
    let Some(found) = match_option(&options, target) else {
        debug!(wanted = target, option_count = options.len(), "no option matched");
        return Err(SelectError::OptionMissing {
            target: target.to_string(),
        });
    };

    doc.set_value(handle, &found.value);
    doc.dispatch(handle, DomEvent::Change);
    debug!(
        wanted = target,
        value = %found.value,
        tier = found.tier.label(),
        "selected option"
    );
    Ok(found.into())
}
