//! Candidate scoring
//!
//! A candidate is scored by how many taxonomy dimensions it adds to the
//! stack, adjusted for risk tier and goal alignment. Scores are relative:
//! they rank candidates and are never shown as absolute values.

use ahash::AHashSet;
use peptalk_core::{CompoundOption, GoalTable, RiskTier, TaxonomyKey};
use serde::{Deserialize, Serialize};

pub const NEW_KEY_POINTS: i32 = 3;
pub const FULLY_COVERED_PENALTY: i32 = 5;
pub const LOW_RISK_BONUS: i32 = 2;
pub const HIGH_RISK_PENALTY: i32 = 2;
pub const GOAL_BONUS: i32 = 4;

/// Scoring weights; penalties are stored as positive magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub new_key: i32,
    pub fully_covered_penalty: i32,
    pub low_risk_bonus: i32,
    pub high_risk_penalty: i32,
    pub goal_bonus: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            new_key: NEW_KEY_POINTS,
            fully_covered_penalty: FULLY_COVERED_PENALTY,
            low_risk_bonus: LOW_RISK_BONUS,
            high_risk_penalty: HIGH_RISK_PENALTY,
            goal_bonus: GOAL_BONUS,
        }
    }
}

/// Per-signal contributions to a candidate's score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    /// Candidate keys the stack does not cover yet
    pub new_keys: Vec<TaxonomyKey>,
    pub coverage: i32,
    pub redundancy: i32,
    pub risk: i32,
    pub goal: i32,
    pub total: i32,
}

/// Weights plus the goal table they are applied with
#[derive(Debug, Clone)]
pub struct StackScorer {
    weights: ScoringWeights,
    goals: GoalTable,
}

impl Default for StackScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), GoalTable::default())
    }
}

impl StackScorer {
    pub fn new(weights: ScoringWeights, goals: GoalTable) -> Self {
        Self { weights, goals }
    }

    /// Override weights, keeping the goal table
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn goals(&self) -> &GoalTable {
        &self.goals
    }

    pub fn score(&self, candidate: &CompoundOption, stack_items: &[CompoundOption], goal_id: Option<&str>) -> i32 {
        self.explain(candidate, stack_items, goal_id).total
    }

    pub fn explain(
        &self,
        candidate: &CompoundOption,
        stack_items: &[CompoundOption],
        goal_id: Option<&str>,
    ) -> ScoreBreakdown {
        let w = &self.weights;
        let covered: AHashSet<TaxonomyKey> = stack_items
            .iter()
            .flat_map(|c| c.taxonomy_keys.iter().copied())
            .collect();

        let mut new_keys: Vec<TaxonomyKey> = Vec::new();
        for key in &candidate.taxonomy_keys {
            if !covered.contains(key) && !new_keys.contains(key) {
                new_keys.push(*key);
            }
        }
        let coverage = w.new_key * new_keys.len() as i32;

        // A keyless candidate on a non-empty stack adds nothing either
        let redundancy = if !stack_items.is_empty() && new_keys.is_empty() {
            -w.fully_covered_penalty
        } else {
            0
        };

        let risk = match candidate.risk_tier {
            RiskTier::Low => w.low_risk_bonus,
            RiskTier::High => -w.high_risk_penalty,
            RiskTier::Moderate | RiskTier::Unknown => 0,
        };

        let goal = match goal_id.map(|id| self.goals.keys_for(id)) {
            Some(keys) if keys.iter().any(|k| candidate.has_key(*k)) => w.goal_bonus,
            _ => 0,
        };

        ScoreBreakdown {
            new_keys,
            coverage,
            redundancy,
            risk,
            goal,
            total: coverage + redundancy + risk + goal,
        }
    }
}

/// Score with default weights and the default goal table
pub fn score_candidate(candidate: &CompoundOption, stack_items: &[CompoundOption], goal_id: Option<&str>) -> i32 {
    StackScorer::default().score(candidate, stack_items, goal_id)
}
