use tool_select_option::SelectOutcome;

/// How a value landed in the control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Text { value: String },
    Toggle { checked: bool },
    Radio { value: String },
    Selection(SelectOutcome),
}

/// Why a write never touched the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    EmptyValue,
    AlreadyFilled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied { identifier: String, applied: Applied },
    Skipped(SkipReason),
}

impl WriteOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied { .. })
    }
}
