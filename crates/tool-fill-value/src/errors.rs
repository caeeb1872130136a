use field_locator::LocatorError;
use thiserror::Error;
use tool_select_option::SelectError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error(transparent)]
    Locate(#[from] LocatorError),
    #[error("dropdown '{identifier}': {source}")]
    Select {
        identifier: String,
        #[source]
        source: SelectError,
    },
    #[error("no radio in group '{group}' carries value '{target}'")]
    RadioMissing { group: String, target: String },
    #[error("field '{identifier}' of type '{input_type}' does not accept values")]
    NotWritable {
        identifier: String,
        input_type: String,
    },
}

impl WriteError {
    /// Whether the failure is an ordinary per-field miss
    pub fn is_not_found(&self) -> bool {
        match self {
            WriteError::Locate(err) => err.is_not_found(),
            WriteError::Select { .. } | WriteError::RadioMissing { .. } => true,
            WriteError::NotWritable { .. } => false,
        }
    }
}
