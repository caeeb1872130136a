pub mod api;
pub mod errors;
pub mod matcher;
pub mod model;

mod runner;

pub use api::{OptionSelector, TextMatchSelector};
pub use errors::SelectError;
pub use matcher::match_option;
pub use model::{MatchTier, OptionMatch, SelectOutcome};
