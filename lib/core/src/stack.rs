//! The user's working selection

use crate::{CompoundCatalog, CompoundKind, CompoundOption, TaxonomyKey};
use serde::{Deserialize, Serialize};

/// Reference to a catalog entry as it is persisted: `{kind, slug}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackItemRef {
    #[serde(default, alias = "type")]
    pub kind: CompoundKind,
    pub slug: String,
}

impl From<&CompoundOption> for StackItemRef {
    fn from(c: &CompoundOption) -> Self {
        Self {
            kind: c.kind,
            slug: c.slug.clone(),
        }
    }
}

/// An ordered collection of compounds under consideration together.
///
/// Item order is display order only. Duplicates are not prevented here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub name: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub items: Vec<CompoundOption>,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goal_id: None,
            items: Vec::new(),
        }
    }

    pub fn with_goal(mut self, goal_id: impl Into<String>) -> Self {
        self.goal_id = Some(goal_id.into());
        self
    }

    /// Rebuild a stack from persisted references, skipping slugs the
    /// catalog no longer carries. Saved order is kept.
    pub fn hydrate(
        name: impl Into<String>,
        goal_id: Option<String>,
        refs: &[StackItemRef],
        catalog: &CompoundCatalog,
    ) -> Self {
        let items = refs
            .iter()
            .filter_map(|r| catalog.get(&r.slug).cloned())
            .collect();

        Self {
            name: name.into(),
            goal_id,
            items,
        }
    }

    pub fn push(&mut self, compound: CompoundOption) {
        self.items.push(compound);
    }

    /// Remove every item with the given slug; returns whether anything changed
    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c.slug != slug);
        self.items.len() != before
    }

    pub fn contains_slug(&self, slug: &str) -> bool {
        self.items.iter().any(|c| c.slug == slug)
    }

    /// Union of every item's taxonomy keys, first-seen order
    pub fn coverage(&self) -> Vec<TaxonomyKey> {
        coverage_of(&self.items)
    }

    pub fn item_refs(&self) -> Vec<StackItemRef> {
        self.items.iter().map(StackItemRef::from).collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Union of taxonomy keys over a slice of compounds, first-seen order
pub fn coverage_of(items: &[CompoundOption]) -> Vec<TaxonomyKey> {
    let mut covered = Vec::new();
    for key in items.iter().flat_map(|c| c.taxonomy_keys.iter()) {
        if !covered.contains(key) {
            covered.push(*key);
        }
    }
    covered
}
