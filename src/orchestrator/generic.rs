//! Key-by-key walk over a bag whose keys are the page's own field names.

use autofill_core_types::bag::is_scalar;
use autofill_core_types::{Document, FillSession, PageLabel, ValueBag};
use tracing::debug;

use super::{settle, FormFiller};

impl FormFiller {
    /// Write every scalar key of `bag` into the control of the same name,
    /// in bag order. Nested bags and arrays are ignored.
    pub(super) fn walk_flat(
        &self,
        doc: &mut dyn Document,
        session: &mut FillSession,
        label: PageLabel,
        bag: &ValueBag,
    ) {
        let config = self.config();
        for (key, value) in bag {
            if config.skips(key, label) {
                debug!(key = %key, page = %label, "key left for manual entry");
                continue;
            }
            if !is_scalar(value) {
                continue;
            }
            if *key == config.language_field {
                self.select_language(doc, session, key, Some(value));
            } else if config.is_selector_key(key) {
                let result = self.writer.select(doc, session, key, value);
                settle(session, key, result);
            } else {
                let result = self.writer.write(doc, session, key, value);
                settle(session, key, result);
            }
        }
    }
}
