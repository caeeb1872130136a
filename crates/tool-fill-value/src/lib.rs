pub mod errors;
pub mod model;
pub mod radio;
pub mod writer;

mod precheck;
mod redact;

pub use errors::WriteError;
pub use model::{Applied, SkipReason, WriteOutcome};
pub use writer::ValueWriter;
