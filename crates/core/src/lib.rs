//! `relay-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the record shapes persisted by the stores, the list-limit value object, and
//! payload fallback rules.

pub mod limit;
pub mod payload;
pub mod record;

pub use limit::ListLimit;
pub use payload::resolve_text;
pub use record::{InputRecord, ProcessedRecord, QueueSnapshot};
