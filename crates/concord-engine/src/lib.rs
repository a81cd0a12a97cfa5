//! Concord Engine
//!
//! The cross-section consistency engine: finds sentences in a document that
//! disagree with each other, either numerically within a shared semantic
//! domain or logically according to an entailment oracle.
//!
//! # Architecture
//!
//! ```text
//! text → RuleSegmenter → sentences → every unordered pair
//!      → NumericMismatchDetector + EntailmentAdapter → Verdict
//!      → report::aggregate → ConsistencyReport
//! ```
//!
//! The [`DomainLexicon`] is expanded once from a lexical database when the
//! engine is built and is read-only afterwards.
//!
//! # Key Features
//!
//! - **Domain-scoped numbers**: numbers are only compared when both
//!   sentences share a financial, temporal or performance context, checked
//!   in that priority order
//! - **Absorbed failures**: oracle errors and timeouts degrade a single pair
//!   to an `ERROR` verdict and never abort the analysis
//! - **Deterministic output**: results follow combination order, also when
//!   pairs are evaluated concurrently
//!
//! # Example Usage
//!
//! ```
//! use concord_engine::{ConsistencyEngine, ConsistencyPayload, EngineConfig};
//! use concord_lexicon::Thesaurus;
//! use concord_nli::MockClassifier;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ConsistencyEngine::from_database(
//!     MockClassifier::new("NEUTRAL", 0.7),
//!     &Thesaurus::builtin(),
//!     EngineConfig::default(),
//! )?;
//!
//! let report = engine.analyze("The deadline is in 3 weeks. The plan needs 4 weeks.");
//! for issue in report.numeric_issues() {
//!     println!("{}", issue.suggestion);
//! }
//!
//! let json = ConsistencyPayload::from(&report).to_json_pretty()?;
//! println!("{}", json);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod lexicon;
mod matcher;
mod normalizer;
mod numeric;
mod oracle;
mod payload;
pub mod report;
mod segmenter;


pub use config::EngineConfig;
pub use engine::{
    pair_count, pair_indices, suggestion_for, ConsistencyEngine, CONSISTENT_SUGGESTION,
    CONTRADICTION_SUGGESTION, ERROR_SUGGESTION, NEUTRAL_SUGGESTION,
};
pub use error::EngineError;
pub use lexicon::{DomainLexicon, DomainTerms};
pub use matcher::DomainMatcher;
pub use normalizer::normalize;
pub use numeric::{
    extract_tokens, NumericMismatchDetector, NumericSet, NumericToken, NO_MISMATCH_REASON,
    NO_NUMBERS_REASON,
};
pub use oracle::{map_label, round_confidence, EntailmentAdapter};
pub use payload::{ConsistencyPayload, NumericRecord, PairRecord};
pub use segmenter::RuleSegmenter;
