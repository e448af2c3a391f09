//! Free-text context matching
//!
//! Scores every pack's terms (label plus synonyms) against a normalized
//! query. A term found verbatim in the query is a phrase hit; otherwise the
//! term earns partial credit for each of its tokens the query shares.
//!
//! ## Scoring
//!
//! ```text
//! weight(t) = 1.2 if len(t) >= 12, 1.0 if len(t) >= 7, else 0.8
//! hit(t)    = weight(t) * 1.6                                  (phrase)
//!           | weight(t) * min(1, shared / max(2, tokens(t)))   (overlap)
//! score     = clamp(sum(hit) / sum(weight), 0, 1)
//! ```

use crate::normalize::{normalize, tokens_of};
use crate::pack::{ContextPack, PackCatalog};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Packs must score strictly above this to be returned
pub const DEFAULT_MIN_SCORE: f64 = 0.18;
/// Terms at least this long get [`LONG_TERM_WEIGHT`]
pub const LONG_TERM_CHARS: usize = 12;
/// Terms at least this long get [`MEDIUM_TERM_WEIGHT`]
pub const MEDIUM_TERM_CHARS: usize = 7;
pub const LONG_TERM_WEIGHT: f64 = 1.2;
pub const MEDIUM_TERM_WEIGHT: f64 = 1.0;
pub const SHORT_TERM_WEIGHT: f64 = 0.8;
/// Multiplier for a term found verbatim in the query
pub const PHRASE_HIT_MULTIPLIER: f64 = 1.6;
/// Minimum denominator for token-overlap credit
pub const TOKEN_EVIDENCE_FLOOR: usize = 2;
/// Matched terms reported per result
pub const MAX_MATCHED_TERMS: usize = 6;
pub const DEFAULT_LIMIT: usize = 3;

/// Tunable matcher constants. Every field defaults to the named constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub min_score: f64,
    pub long_term_chars: usize,
    pub medium_term_chars: usize,
    pub long_term_weight: f64,
    pub medium_term_weight: f64,
    pub short_term_weight: f64,
    pub phrase_hit_multiplier: f64,
    pub token_evidence_floor: usize,
    pub max_matched_terms: usize,
    pub default_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            long_term_chars: LONG_TERM_CHARS,
            medium_term_chars: MEDIUM_TERM_CHARS,
            long_term_weight: LONG_TERM_WEIGHT,
            medium_term_weight: MEDIUM_TERM_WEIGHT,
            short_term_weight: SHORT_TERM_WEIGHT,
            phrase_hit_multiplier: PHRASE_HIT_MULTIPLIER,
            token_evidence_floor: TOKEN_EVIDENCE_FLOOR,
            max_matched_terms: MAX_MATCHED_TERMS,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl MatchConfig {
    /// Weight of a normalized term by its length
    #[inline]
    pub fn term_weight(&self, term_len: usize) -> f64 {
        if term_len >= self.long_term_chars {
            self.long_term_weight
        } else if term_len >= self.medium_term_chars {
            self.medium_term_weight
        } else {
            self.short_term_weight
        }
    }
}

/// One pack that cleared the threshold
#[derive(Debug, Clone, Serialize)]
pub struct ContextMatch<'a> {
    pub pack: &'a ContextPack,
    pub score: f64,
    pub matched_terms: Vec<String>,
}

#[derive(Debug, Clone)]
struct PreparedTerm {
    text: String,
    tokens: Vec<String>,
    weight: f64,
}

fn prepare_terms(pack: &ContextPack, config: &MatchConfig) -> Vec<PreparedTerm> {
    let mut seen = AHashSet::new();
    std::iter::once(&pack.label)
        .chain(pack.synonyms.iter())
        .map(|raw| normalize(raw))
        .filter(|term| !term.is_empty() && seen.insert(term.clone()))
        .map(|text| PreparedTerm {
            tokens: tokens_of(&text).into_iter().map(str::to_string).collect(),
            weight: config.term_weight(text.len()),
            text,
        })
        .collect()
}

fn push_distinct(matched: &mut Vec<String>, term: &str, cap: usize) {
    if matched.len() < cap && !matched.iter().any(|m| m == term) {
        matched.push(term.to_string());
    }
}

/// Score one pack's prepared terms against a normalized query
fn score_terms(
    query: &str,
    query_tokens: &AHashSet<&str>,
    terms: &[PreparedTerm],
    config: &MatchConfig,
) -> (f64, Vec<String>) {
    let mut hits = 0.0;
    let mut weight = 0.0;
    let mut matched = Vec::new();

    for term in terms {
        weight += term.weight;

        if query.contains(term.text.as_str()) {
            hits += term.weight * config.phrase_hit_multiplier;
            push_distinct(&mut matched, &term.text, config.max_matched_terms);
            continue;
        }

        let shared: Vec<&str> = term
            .tokens
            .iter()
            .map(String::as_str)
            .filter(|t| query_tokens.contains(t))
            .collect();
        if shared.is_empty() {
            continue;
        }

        let denom = term.tokens.len().max(config.token_evidence_floor).max(1) as f64;
        hits += term.weight * (shared.len() as f64 / denom).min(1.0);
        for tok in shared {
            push_distinct(&mut matched, tok, config.max_matched_terms);
        }
    }

    if weight <= 0.0 {
        return (0.0, matched);
    }
    ((hits / weight).clamp(0.0, 1.0), matched)
}

fn rank<'a, 't, I>(query: &str, scored: I, config: &MatchConfig, limit: usize) -> Vec<ContextMatch<'a>>
where
    I: Iterator<Item = (&'a ContextPack, &'t [PreparedTerm])>,
{
    let normalized = normalize(query);
    if normalized.is_empty() {
        return Vec::new();
    }
    let query_tokens: AHashSet<&str> = tokens_of(&normalized).into_iter().collect();

    let mut results: Vec<ContextMatch<'a>> = scored
        .filter_map(|(pack, terms)| {
            let (score, matched_terms) = score_terms(&normalized, &query_tokens, terms, config);
            (score > config.min_score).then_some(ContextMatch {
                pack,
                score,
                matched_terms,
            })
        })
        .collect();

    // sort_by is stable: ties keep catalog order
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results.truncate(limit.max(1));
    results
}

/// Matcher built once from a pack catalog, with terms precomputed
#[derive(Debug, Clone)]
pub struct ContextMatcher {
    packs: Vec<ContextPack>,
    terms: Vec<Vec<PreparedTerm>>,
    config: MatchConfig,
}

impl ContextMatcher {
    pub fn new(packs: Vec<ContextPack>) -> Self {
        Self::with_config(packs, MatchConfig::default())
    }

    pub fn with_config(packs: Vec<ContextPack>, config: MatchConfig) -> Self {
        let terms = packs.iter().map(|p| prepare_terms(p, &config)).collect();
        Self {
            packs,
            terms,
            config,
        }
    }

    pub fn from_catalog(catalog: PackCatalog, config: MatchConfig) -> Self {
        Self::with_config(catalog.into_packs(), config)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn packs(&self) -> &[ContextPack] {
        &self.packs
    }

    pub fn pack(&self, id: &str) -> Option<&ContextPack> {
        self.packs.iter().find(|p| p.id == id)
    }

    /// Best packs for `query`, at most `max(1, limit)` of them
    pub fn match_query(&self, query: &str, limit: usize) -> Vec<ContextMatch<'_>> {
        let scored = self
            .packs
            .iter()
            .zip(self.terms.iter().map(Vec::as_slice));
        rank(query, scored, &self.config, limit)
    }

    /// [`match_query`](Self::match_query) with the configured default limit
    pub fn best_matches(&self, query: &str) -> Vec<ContextMatch<'_>> {
        self.match_query(query, self.config.default_limit)
    }

    /// Typeahead: labels whose label or any synonym contains `partial`
    /// (case-insensitive), in catalog order
    pub fn suggest_labels(&self, partial: &str, limit: usize) -> Vec<&str> {
        let needle = partial.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.packs
            .iter()
            .filter(|p| {
                p.label.to_lowercase().contains(&needle)
                    || p.synonyms.iter().any(|s| s.to_lowercase().contains(&needle))
            })
            .map(|p| p.label.as_str())
            .take(limit)
            .collect()
    }
}

/// One-shot matching with default constants; terms are prepared per call
pub fn match_context<'a>(query: &str, packs: &'a [ContextPack], limit: usize) -> Vec<ContextMatch<'a>> {
    let config = MatchConfig::default();
    let terms: Vec<Vec<PreparedTerm>> = packs.iter().map(|p| prepare_terms(p, &config)).collect();
    let scored = packs.iter().zip(terms.iter().map(Vec::as_slice));
    rank(query, scored, &config, limit)
}
