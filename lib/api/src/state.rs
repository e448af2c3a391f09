use peptalk_context::{ContextMatcher, MatchConfig, SearchIndex};
use peptalk_core::{Error, Result};
use peptalk_stack::{ScoringWeights, StackScorer, DEFAULT_SUGGESTION_LIMIT};
use peptalk_storage::{Content, StorageManager};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tunable constants, optionally read from a JSON file at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub matcher: MatchConfig,
    pub scoring: ScoringWeights,
    pub suggestion_limit: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            matcher: MatchConfig::default(),
            scoring: ScoringWeights::default(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl Tuning {
    /// Reject values that would make every query match or none at all
    pub fn validate(&self) -> Result<()> {
        let m = &self.matcher;
        if !(0.0..1.0).contains(&m.min_score) {
            return Err(Error::InvalidConfig(format!(
                "matcher.min_score must be in [0, 1), got {}",
                m.min_score
            )));
        }
        if m.medium_term_chars > m.long_term_chars {
            return Err(Error::InvalidConfig(
                "matcher.medium_term_chars exceeds long_term_chars".to_string(),
            ));
        }
        let weights = [m.long_term_weight, m.medium_term_weight, m.short_term_weight];
        if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(Error::InvalidConfig("matcher term weights must be positive".to_string()));
        }
        if !m.phrase_hit_multiplier.is_finite() || m.phrase_hit_multiplier <= 0.0 {
            return Err(Error::InvalidConfig(
                "matcher.phrase_hit_multiplier must be positive".to_string(),
            ));
        }
        if self.suggestion_limit == 0 {
            return Err(Error::InvalidConfig("suggestion_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Read-only engines plus the mutable stores, shared by every worker
pub struct AppState {
    pub content: Content,
    pub matcher: ContextMatcher,
    pub scorer: StackScorer,
    pub index: SearchIndex,
    pub storage: Arc<StorageManager>,
    pub suggestion_limit: usize,
}

impl AppState {
    pub fn new(
        content: Content,
        matcher: ContextMatcher,
        scorer: StackScorer,
        storage: Arc<StorageManager>,
        suggestion_limit: usize,
    ) -> Self {
        let index = SearchIndex::new(&content.synonyms);
        Self {
            content,
            matcher,
            scorer,
            index,
            storage,
            suggestion_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_tuning_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"matcher": {"min_score": 0.3}}"#).unwrap();
        assert_eq!(tuning.matcher.min_score, 0.3);
        assert_eq!(tuning.matcher.phrase_hit_multiplier, MatchConfig::default().phrase_hit_multiplier);
        assert_eq!(tuning.scoring, ScoringWeights::default());
        assert_eq!(tuning.suggestion_limit, DEFAULT_SUGGESTION_LIMIT);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let mut tuning = Tuning::default();
        tuning.matcher.min_score = 1.5;
        assert!(matches!(tuning.validate(), Err(Error::InvalidConfig(_))));

        let mut tuning = Tuning::default();
        tuning.suggestion_limit = 0;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.matcher.short_term_weight = 0.0;
        assert!(tuning.validate().is_err());
    }
}
