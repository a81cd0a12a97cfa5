//! Concord Domain Layer
//!
//! Core value types and collaborator traits for the cross-section
//! consistency checker. It has ZERO external dependencies and defines the
//! vocabulary every other crate speaks.
//!
//! ## Key Concepts
//!
//! - **Sentence**: an indexed, trimmed, non-empty unit of the document
//! - **Semantic Domain**: a topical bucket (financial, temporal, performance)
//!   that decides whether two numeric claims are comparable
//! - **Entailment Verdict**: the oracle's judgement on a sentence pair
//! - **Pair Result**: the combined numeric + entailment verdict for one pair
//! - **Consistency Report**: every pair result plus the rendered summary
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Collaborators (sentence splitting, synonym lookup, entailment) are
//!   trait boundaries implemented in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pair;
pub mod semantic_domain;
pub mod sentence;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use pair::{ConsistencyReport, PairResult, REMEDIATION_MARKER};
pub use semantic_domain::SemanticDomain;
pub use sentence::Sentence;
pub use verdict::{EntailmentLabel, EntailmentVerdict, NumericComparison, Verdict};
