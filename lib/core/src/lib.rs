//! # Pep-Talk Core
//!
//! Core data model shared by the Pep-Talk engines.
//!
//! This crate provides the plain, immutable records the matcher and the
//! stack engine operate on:
//!
//! - [`CompoundOption`] - A stackable catalog entry (peptide or blend)
//! - [`TaxonomyKey`] - The fixed category vocabulary
//! - [`EvidenceGrade`] / [`RiskTier`] - Ordered evidence and coarse safety tiers
//! - [`GoalTable`] - Goal id → taxonomy keys mapping
//! - [`Stack`] - The user's working selection
//! - [`CompoundFilter`] - Search-text and category filters for the builder
//!
//! ## Example
//!
//! ```rust
//! use peptalk_core::{CompoundCatalog, CompoundKind, CompoundOption, RiskTier, Stack, TaxonomyKey};
//!
//! let catalog = CompoundCatalog::new(vec![
//!     CompoundOption::new("bpc-157", "BPC-157", CompoundKind::Peptide)
//!         .with_taxonomy([TaxonomyKey::RegenerativeRepair])
//!         .with_risk(RiskTier::Low),
//! ]).unwrap();
//!
//! let mut stack = Stack::new("Recovery");
//! stack.push(catalog.require("bpc-157").unwrap().clone());
//! assert_eq!(stack.coverage(), vec![TaxonomyKey::RegenerativeRepair]);
//! ```

pub mod catalog;
pub mod compound;
pub mod error;
pub mod filter;
pub mod goal;
pub mod stack;
pub mod taxonomy;

pub use catalog::CompoundCatalog;
pub use compound::{CompoundKind, CompoundOption, EvidenceGrade, RiskTier};
pub use error::{Error, Result};
pub use filter::{CompoundFilter, Filter, FilterCondition};
pub use goal::{GoalEntry, GoalOption, GoalTable};
pub use stack::{coverage_of, Stack, StackItemRef};
pub use taxonomy::TaxonomyKey;
