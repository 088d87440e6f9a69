//! # regwatch-core — Foundational Types for RegWatch
//!
//! This crate is the leaf of the RegWatch dependency DAG. It defines the
//! domain primitives shared by the feed, agent, API, client, and CLI crates:
//! risk levels, identifier newtypes, the change and source records, the
//! analysis result shape, and the pure filter/sort engine applied to change
//! collections.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** [`ChangeId`] and [`SourceId`] are
//!    validated string newtypes. Upstream feeds assign opaque ids, so they are
//!    strings rather than UUIDs, but never bare `String` in a public API.
//!
//! 2. **One `RiskLevel` enum.** Four ordered variants, exhaustive `match`
//!    everywhere, case-insensitive parsing so both the lowercase API casing
//!    and the capitalized analysis-service casing land in the same type.
//!
//! 3. **Wire-format fidelity.** Records serialize in the camelCase shape the
//!    dashboard consumes; inbound remote shapes use `#[serde(default)]` so a
//!    schema-evolving upstream cannot break deserialization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `regwatch-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod analysis;
pub mod change;
pub mod error;
pub mod filter;
pub mod identity;
pub mod risk;
pub mod source;
pub mod stats;

// Re-export primary types for ergonomic imports.
pub use analysis::{AnalysisResult, AnalysisTask, RetrievedObligation};
pub use change::{ChangeRecord, ChangesPage};
pub use error::ValidationError;
pub use filter::ChangeFilter;
pub use identity::{ChangeId, SourceId};
pub use risk::RiskLevel;
pub use source::{SourceRecord, SourceStatus};
pub use stats::Stats;
