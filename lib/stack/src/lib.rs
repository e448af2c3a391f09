//! # Pep-Talk Stack
//!
//! Stack suggestion engine: given the compounds already in a stack, rank
//! the rest of the catalog by how well each one complements it, and report
//! categories the stack already covers more than once.
//!
//! ## Example
//!
//! ```rust
//! use peptalk_core::{CompoundKind, CompoundOption, RiskTier, TaxonomyKey};
//! use peptalk_stack::{find_redundancies, score_candidate};
//!
//! let a = CompoundOption::new("a", "CompoundA", CompoundKind::Peptide)
//!     .with_taxonomy([TaxonomyKey::MetabolicWeight]);
//! let c = CompoundOption::new("c", "CompoundC", CompoundKind::Peptide)
//!     .with_taxonomy([TaxonomyKey::RegenerativeRepair])
//!     .with_risk(RiskTier::Low);
//!
//! assert_eq!(score_candidate(&c, &[a.clone()], None), 5);
//! assert!(find_redundancies(&[a, c]).is_empty());
//! ```

pub mod redundancy;
pub mod score;
pub mod submission;
pub mod suggest;

pub use redundancy::{find_redundancies, Redundancy};
pub use score::{score_candidate, ScoreBreakdown, ScoringWeights, StackScorer};
pub use submission::{goal_title, submission_text};
pub use suggest::{top_positive, CandidateQuery, RankedCandidate, SuggestionReport, DEFAULT_SUGGESTION_LIMIT};
