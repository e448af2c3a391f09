//! Candidate filters applied by the builder before ranking

use crate::{CompoundOption, TaxonomyKey};

pub trait Filter {
    fn matches(&self, compound: &CompoundOption) -> bool;
}

pub struct CompoundFilter {
    condition: FilterCondition,
}

#[derive(Debug, Clone)]
pub enum FilterCondition {
    /// Compound carries the taxonomy key (category filter)
    HasKey(TaxonomyKey),
    /// Case-insensitive substring of the display name; empty matches all
    NameContains(String),
    And(Vec<FilterCondition>),
}

impl CompoundFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    /// The builder's search box and category chips combined.
    /// Returns `None` when neither is active.
    pub fn from_inputs(search: Option<&str>, category: Option<TaxonomyKey>) -> Option<Self> {
        let mut conditions = Vec::new();
        if let Some(key) = category {
            conditions.push(FilterCondition::HasKey(key));
        }
        if let Some(text) = search.filter(|s| !s.is_empty()) {
            conditions.push(FilterCondition::NameContains(text.to_lowercase()));
        }

        match conditions.len() {
            0 => None,
            1 => conditions.pop().map(Self::new),
            _ => Some(Self::new(FilterCondition::And(conditions))),
        }
    }

    pub fn condition(&self) -> &FilterCondition {
        &self.condition
    }

    fn matches_condition(condition: &FilterCondition, compound: &CompoundOption) -> bool {
        match condition {
            FilterCondition::HasKey(key) => compound.has_key(*key),
            FilterCondition::NameContains(text) => {
                text.is_empty() || compound.name.to_lowercase().contains(&text.to_lowercase())
            }
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, compound))
            }
        }
    }
}

impl Filter for CompoundFilter {
    fn matches(&self, compound: &CompoundOption) -> bool {
        Self::matches_condition(&self.condition, compound)
    }
}
