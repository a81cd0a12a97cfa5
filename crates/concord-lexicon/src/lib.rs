//! Concord Lexicon
//!
//! Lexical database implementations behind the
//! [`LexicalDatabase`](concord_domain::traits::LexicalDatabase) trait.
//!
//! # Providers
//!
//! - [`Thesaurus`]: in-memory synonym table, loadable from JSON or TOML, with
//!   an embedded WordNet-derived table for the domain seed keywords
//! - [`NullLexicon`]: knows no synonyms; used when no database is available
//!
//! # Examples
//!
//! ```
//! use concord_lexicon::Thesaurus;
//! use concord_domain::traits::LexicalDatabase;
//!
//! let thesaurus = Thesaurus::builtin();
//! assert!(thesaurus.synonyms_of("expense").contains("expenditure"));
//! assert!(thesaurus.synonyms_of("unheard-of").is_empty());
//! ```

#![warn(missing_docs)]

mod error;
mod thesaurus;

pub use error::LexiconError;
pub use thesaurus::{NullLexicon, Thesaurus};
