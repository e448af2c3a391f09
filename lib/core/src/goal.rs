//! Goal → taxonomy mapping
//!
//! A goal (e.g. `fat_loss`) is aligned with one or more taxonomy keys. The
//! table is plain data; the scorer receives it explicitly.

use crate::TaxonomyKey;
use serde::{Deserialize, Serialize};

/// A goal the user can pick in the builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalOption {
    pub goal_id: String,
    pub title: String,
}

/// Fixed goal id → taxonomy keys table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalTable {
    entries: Vec<GoalEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalEntry {
    pub goal_id: String,
    pub keys: Vec<TaxonomyKey>,
}

impl GoalTable {
    pub fn new(entries: Vec<GoalEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Taxonomy keys aligned with a goal; empty for unknown goals
    pub fn keys_for(&self, goal_id: &str) -> &[TaxonomyKey] {
        self.entries
            .iter()
            .find(|e| e.goal_id == goal_id)
            .map(|e| e.keys.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, goal_id: &str) -> bool {
        self.entries.iter().any(|e| e.goal_id == goal_id)
    }

    pub fn goal_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.goal_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GoalTable {
    fn default() -> Self {
        use TaxonomyKey::*;

        let entry = |id: &str, keys: &[TaxonomyKey]| GoalEntry {
            goal_id: id.to_string(),
            keys: keys.to_vec(),
        };

        Self::new(vec![
            entry("fat_loss", &[MetabolicWeight]),
            entry("recovery", &[RegenerativeRepair, MusclePerformance]),
            entry("gut", &[ImmunomodulatoryInflammation, RegenerativeRepair]),
            entry("cognition_mood", &[NeurocognitiveMood]),
            entry("sleep", &[SleepCircadian, NeurocognitiveMood]),
            entry("skin_hair", &[CosmeticTopical, RegenerativeRepair]),
            entry("longevity", &[MitochondrialLongevity, EndocrineHormonal]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = GoalTable::default();
        assert_eq!(table.len(), 7);
        assert_eq!(
            table.keys_for("sleep"),
            &[TaxonomyKey::SleepCircadian, TaxonomyKey::NeurocognitiveMood]
        );
        assert!(table.keys_for("world_peace").is_empty());
    }

    #[test]
    fn test_custom_table_replaces_defaults() {
        let table = GoalTable::new(vec![GoalEntry {
            goal_id: "immune".to_string(),
            keys: vec![TaxonomyKey::ImmunomodulatoryInflammation],
        }]);
        assert!(table.contains("immune"));
        assert!(!table.contains("fat_loss"));
        assert_eq!(table.goal_ids().collect::<Vec<_>>(), vec!["immune"]);
    }
}
