//! Field locator - resolve a symbolic field identifier to a live control
//!
//! Target pages name their controls inconsistently across releases, so the
//! locator walks a fixed fallback chain:
//! - exact `id` attribute
//! - exact `name` attribute
//! - `name` attribute containing the identifier
//! - `id` attribute containing the identifier
//!
//! The first hit wins and must be rendered on screen.

pub mod errors;
pub mod resolver;
pub mod strategies;
pub mod types;

pub use errors::*;
pub use resolver::*;
pub use strategies::*;
pub use types::*;
