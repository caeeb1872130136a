//! Visa form autofill library
//!
//! Classifies the page, resolves fields and fills them from a value bag.
//! The DOM is reached only through the `Document` trait of
//! `autofill-core-types`.

pub mod agent;
pub mod classifier;
pub mod commands;
pub mod config;
pub mod detect;
pub mod errors;
pub mod language;
pub mod orchestrator;
pub mod roster;
pub mod session;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types for external use
pub use agent::{spawn_agent, AgentHandle};
pub use autofill_core_types::{Document, MemoryControl, MemoryDocument, PageLabel, ValueBag};
pub use classifier::{classify, is_dependent_page};
pub use commands::{Ack, PageAgent, PageInfo, Request, Response};
pub use config::FillerConfig;
pub use detect::{detect_fields, DetectedField};
pub use errors::{AutofillError, Result};
pub use orchestrator::{DependentPage, FillReport, FormFiller, Regime};
pub use roster::{DependentRecord, Person, Roster};
pub use session::AutofillSession;
pub use storage::{FileStorage, MemoryStorage, StoragePort};
