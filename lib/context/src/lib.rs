//! # Pep-Talk Context
//!
//! Free-text context matching: ranks a user's description of their
//! situation ("my kidneys are acting up") against a catalog of context
//! packs and explains each match.
//!
//! - [`ContextMatcher`] - Precomputed matcher over a pack catalog
//! - [`match_context`] - One-shot matching with default constants
//! - [`Considerations`] - Display copy for a matched pack
//! - [`SearchIndex`] - Search-box resolution over entity synonyms
//!
//! ## Example
//!
//! ```rust
//! use peptalk_context::{match_context, ContextPack};
//!
//! let packs = vec![
//!     ContextPack::new("kidney", "Kidney disease")
//!         .with_synonyms(["kidney", "kidney problems", "kidney issues"]),
//! ];
//!
//! let results = match_context("my kidneys are acting up, thinking about trying this", &packs, 3);
//! assert_eq!(results[0].pack.id, "kidney");
//! assert_eq!(results[0].matched_terms, vec!["kidney"]);
//! ```

pub mod considerations;
pub mod index;
pub mod matcher;
pub mod normalize;
pub mod pack;

pub use considerations::{Considerations, SUGGESTION_LIMIT};
pub use index::{normalize_search, Resolution, SearchIndex, SynonymRow};
pub use matcher::{match_context, ContextMatch, ContextMatcher, MatchConfig};
pub use normalize::{normalize, tokenize};
pub use pack::{CatalogError, ContextPack, ExplanationTemplates, PackCatalog, Signal};
