//! Ranked candidate list and suggested additions

use crate::score::StackScorer;
use peptalk_core::{CompoundFilter, CompoundOption, Filter, Stack, TaxonomyKey};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// A catalog entry outside the stack, with its score
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate<'a> {
    pub compound: &'a CompoundOption,
    pub score: i32,
}

/// Builder inputs narrowing the candidate list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<TaxonomyKey>,
}

impl CandidateQuery {
    pub fn filter(&self) -> Option<CompoundFilter> {
        CompoundFilter::from_inputs(self.search.as_deref(), self.category)
    }
}

/// Everything the builder shows next to the stack
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionReport<'a> {
    pub candidates: Vec<RankedCandidate<'a>>,
    pub suggestions: Vec<RankedCandidate<'a>>,
}

impl StackScorer {
    /// Catalog entries not in the stack that pass the filters, best first.
    /// Ties keep catalog order.
    pub fn rank_candidates<'a>(
        &self,
        catalog: &'a [CompoundOption],
        stack: &Stack,
        query: &CandidateQuery,
    ) -> Vec<RankedCandidate<'a>> {
        let filter = query.filter();

        let mut ranked: Vec<RankedCandidate<'a>> = catalog
            .iter()
            .filter(|c| !stack.contains_slug(&c.slug))
            .filter(|c| filter.as_ref().map_or(true, |f| f.matches(c)))
            .map(|compound| RankedCandidate {
                compound,
                score: self.score(compound, &stack.items, stack.goal_id.as_deref()),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// The first `limit` ranked candidates with a strictly positive score
    pub fn suggest<'a>(
        &self,
        catalog: &'a [CompoundOption],
        stack: &Stack,
        query: &CandidateQuery,
        limit: usize,
    ) -> SuggestionReport<'a> {
        let candidates = self.rank_candidates(catalog, stack, query);
        let suggestions = top_positive(&candidates, limit);
        SuggestionReport {
            candidates,
            suggestions,
        }
    }
}

/// Positive-scoring prefix of an already ranked list
pub fn top_positive<'a>(ranked: &[RankedCandidate<'a>], limit: usize) -> Vec<RankedCandidate<'a>> {
    ranked
        .iter()
        .filter(|c| c.score > 0)
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use peptalk_core::{CompoundKind, RiskTier};

    fn catalog() -> Vec<CompoundOption> {
        vec![
            CompoundOption::new("semaglutide", "Semaglutide", CompoundKind::Peptide)
                .with_taxonomy([TaxonomyKey::MetabolicWeight])
                .with_risk(RiskTier::Moderate),
            CompoundOption::new("tirzepatide", "Tirzepatide", CompoundKind::Peptide)
                .with_taxonomy([TaxonomyKey::MetabolicWeight])
                .with_risk(RiskTier::Moderate),
            CompoundOption::new("bpc-157", "BPC-157", CompoundKind::Peptide)
                .with_taxonomy([TaxonomyKey::RegenerativeRepair])
                .with_risk(RiskTier::Low),
            CompoundOption::new("dsip", "DSIP", CompoundKind::Peptide)
                .with_taxonomy([TaxonomyKey::SleepCircadian])
                .with_risk(RiskTier::High),
            CompoundOption::new("glow", "GLOW Blend", CompoundKind::Blend)
                .with_taxonomy([TaxonomyKey::CosmeticTopical, TaxonomyKey::RegenerativeRepair])
                .with_risk(RiskTier::Unknown),
        ]
    }

    fn stack_with(catalog: &[CompoundOption], slugs: &[&str]) -> Stack {
        let mut stack = Stack::new("Test");
        for c in catalog.iter().filter(|c| slugs.contains(&c.slug.as_str())) {
            stack.push(c.clone());
        }
        stack
    }

    #[test]
    fn test_rank_excludes_stack_and_sorts() {
        let cat = catalog();
        let stack = stack_with(&cat, &["semaglutide"]);
        let ranked = StackScorer::default().rank_candidates(&cat, &stack, &CandidateQuery::default());

        let order: Vec<(&str, i32)> = ranked.iter().map(|r| (r.compound.slug.as_str(), r.score)).collect();
        assert_eq!(
            order,
            vec![("glow", 6), ("bpc-157", 5), ("dsip", 1), ("tirzepatide", -5)]
        );
    }

    #[test]
    fn test_suggestions_positive_and_capped() {
        let cat = catalog();
        let stack = stack_with(&cat, &["semaglutide"]);
        let report = StackScorer::default().suggest(&cat, &stack, &CandidateQuery::default(), 2);

        assert_eq!(report.candidates.len(), 4);
        let slugs: Vec<_> = report.suggestions.iter().map(|r| r.compound.slug.as_str()).collect();
        assert_eq!(slugs, vec!["glow", "bpc-157"]);

        let all = StackScorer::default().suggest(&cat, &stack, &CandidateQuery::default(), DEFAULT_SUGGESTION_LIMIT);
        assert!(all.suggestions.iter().all(|r| r.score > 0));
        assert_eq!(all.suggestions.len(), 3);
    }

    #[test]
    fn test_filters_apply_before_ranking() {
        let cat = catalog();
        let stack = Stack::new("Empty").with_goal("recovery");
        let query = CandidateQuery {
            search: Some("b".into()),
            category: Some(TaxonomyKey::RegenerativeRepair),
        };
        let ranked = StackScorer::default().rank_candidates(&cat, &stack, &query);

        let slugs: Vec<_> = ranked.iter().map(|r| r.compound.slug.as_str()).collect();
        // glow: 2 new keys + goal; bpc-157: 1 new key + low risk + goal
        assert_eq!(slugs, vec!["glow", "bpc-157"]);
        assert_eq!(ranked[0].score, 10);
        assert_eq!(ranked[1].score, 9);
    }
}
