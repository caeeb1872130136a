//! Shared primitives for the autofill engine.
//!
//! Everything the locator, the option matcher, the value writer and the
//! orchestrator need to agree on lives here: page labels, the value bag
//! helpers, the per-pass write-once session and the `Document` seam that
//! stands in for the live DOM.

pub mod bag;
pub mod dom;
pub mod memory;
pub mod page;
pub mod session;

pub use bag::ValueBag;
pub use dom::{ControlHandle, ControlKind, ControlSnapshot, Document, DomEvent, SelectOption};
pub use memory::{MemoryControl, MemoryDocument};
pub use page::{PageLabel, ParseLabelError};
pub use session::{FillPassId, FillSession};
