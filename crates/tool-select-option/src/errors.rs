use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("control is not a dropdown: {0}")]
    NotSelection(String),
    #[error("option not found for target '{target}'")]
    OptionMissing { target: String },
    #[error("control vanished before selection")]
    Stale,
}
