//! # Pep-Talk
//!
//! Context matching and stack suggestions for peptide education content.
//!
//! Two independent engines sit at the center:
//!
//! - **Context matcher**: ranks a free-text description of the reader's
//!   situation against a catalog of context packs (conditions, medication
//!   classes, life stages) and explains each match.
//! - **Stack engine**: ranks compounds to add to a stack by how much they
//!   complement it, and reports categories the stack already covers twice.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! peptalk --http-port 8080 --catalog data/catalog.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use peptalk::prelude::*;
//!
//! let matcher = ContextMatcher::from_catalog(PackCatalog::builtin().unwrap(), MatchConfig::default());
//! let results = matcher.best_matches("kidney failure on dialysis");
//! assert_eq!(results[0].pack.id, "pt_ctx_kidney_disease_ckd");
//!
//! let stack = vec![
//!     CompoundOption::new("semaglutide", "Semaglutide", CompoundKind::Peptide)
//!         .with_taxonomy([TaxonomyKey::MetabolicWeight]),
//! ];
//! let candidate = CompoundOption::new("bpc-157", "BPC-157", CompoundKind::Peptide)
//!     .with_taxonomy([TaxonomyKey::RegenerativeRepair])
//!     .with_risk(RiskTier::Low);
//! assert_eq!(score_candidate(&candidate, &stack, None), 5);
//! ```
//!
//! ## Crate Structure
//!
//! - `peptalk-core` - Compounds, taxonomy, goals, stacks and filters
//! - `peptalk-context` - Context packs, matcher, considerations, search index
//! - `peptalk-stack` - Candidate scoring, suggestions, redundancy reports
//! - `peptalk-storage` - Content loading, saved stacks, moderation queue
//! - `peptalk-api` - REST API

// Re-export core types
pub use peptalk_core::{
    CompoundCatalog, CompoundFilter, CompoundKind, CompoundOption, Error, EvidenceGrade, Filter,
    FilterCondition, GoalOption, GoalTable, Result, RiskTier, Stack, StackItemRef, TaxonomyKey,
};

// Re-export engines
pub use peptalk_context::{
    match_context, Considerations, ContextMatch, ContextMatcher, ContextPack, MatchConfig, PackCatalog,
    Resolution, SearchIndex, Signal,
};
pub use peptalk_stack::{
    find_redundancies, score_candidate, submission_text, CandidateQuery, Redundancy, ScoringWeights,
    StackScorer,
};

// Re-export storage and API
pub use peptalk_api::{AppState, RestApi, Tuning};
pub use peptalk_storage::{Content, SavedStackStore, StorageManager, SubmissionQueue};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        find_redundancies, match_context, score_candidate, CompoundCatalog, CompoundKind, CompoundOption,
        ContextMatcher, ContextPack, Error, GoalTable, MatchConfig, PackCatalog, Result, RiskTier,
        ScoringWeights, Stack, StackScorer, TaxonomyKey,
    };
}
