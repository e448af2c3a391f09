//! Search resolution over entity synonym rows
//!
//! The index is built explicitly from synonym rows and passed to whoever
//! needs it; it is immutable once built.

use ahash::{AHashMap, AHashSet};
use peptalk_core::CompoundKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix-matched terms considered for search results
pub const MAX_PREFIX_TERMS: usize = 15;
/// Distinct routes returned for search results
pub const MAX_CANDIDATES: usize = 25;

/// One synonym row: a search term and the entity route it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymRow {
    pub term: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub slugs: Vec<String>,
}

impl SynonymRow {
    pub fn new(term: impl Into<String>, route: impl Into<String>, slugs: Vec<String>) -> Self {
        Self {
            term: term.into(),
            route: route.into(),
            slugs,
        }
    }

    /// Exactly one non-empty slug and a non-empty route
    pub fn is_strict(&self) -> bool {
        !self.route.trim().is_empty()
            && self.slugs.len() == 1
            && self.slugs.iter().all(|s| !s.trim().is_empty())
    }
}

/// What a search query resolves to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Resolution {
    Empty {
        query_norm: String,
    },
    DirectEntity {
        query_norm: String,
        route: String,
        kind: CompoundKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
    },
    SearchResults {
        query_norm: String,
        candidates: Vec<String>,
    },
}

impl Resolution {
    pub fn query_norm(&self) -> &str {
        match self {
            Resolution::Empty { query_norm }
            | Resolution::DirectEntity { query_norm, .. }
            | Resolution::SearchResults { query_norm, .. } => query_norm,
        }
    }
}

/// Search-box normalizer: casefold, unify dashes and beta, separators to
/// spaces (hyphen kept), whitespace collapsed.
pub fn normalize_search(q: &str) -> String {
    let mut out = String::with_capacity(q.len());
    for c in q.trim().to_lowercase().chars() {
        match c {
            '–' | '—' => out.push('-'),
            'β' => out.push('b'),
            '+' | '/' | '&' | ',' | '_' | ':' | ';' | '|' | '.' | '(' | ')' | '{' | '}' | '['
            | ']' | '<' | '>' | '!' | '?' | '"' | '“' | '”' | '‘' | '’' => out.push(' '),
            _ => out.push(c),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn route_kind(route: &str) -> CompoundKind {
    if route.starts_with("blend:") {
        CompoundKind::Blend
    } else {
        CompoundKind::Peptide
    }
}

/// Peptide routes before blend routes, then lexical
fn route_order(route: &str) -> (u8, &str) {
    match route_kind(route) {
        CompoundKind::Peptide => (0, route),
        CompoundKind::Blend => (1, route),
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    strict: AHashMap<String, String>,
    terms: BTreeMap<String, Vec<String>>,
}

impl SearchIndex {
    pub fn new(rows: &[SynonymRow]) -> Self {
        let mut strict = AHashMap::new();
        let mut terms: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for row in rows {
            let term = normalize_search(&row.term);
            let route = row.route.trim();
            if term.is_empty() || route.is_empty() {
                continue;
            }

            let routes = terms.entry(term.clone()).or_default();
            if !routes.iter().any(|r| r == route) {
                routes.push(route.to_string());
            }
            if row.is_strict() {
                strict.insert(term, route.to_string());
            }
        }

        Self { strict, terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn resolve(&self, query: &str) -> Resolution {
        let query_norm = normalize_search(query);
        if query_norm.is_empty() {
            return Resolution::Empty { query_norm };
        }

        if let Some(route) = self.strict.get(&query_norm) {
            return Resolution::DirectEntity {
                kind: route_kind(route),
                slug: route.split_once(':').map(|(_, slug)| slug.to_string()),
                route: route.clone(),
                query_norm,
            };
        }

        let mut seen = AHashSet::new();
        let mut routes: Vec<&str> = self
            .terms
            .range(query_norm.clone()..)
            .take_while(|(term, _)| term.starts_with(&query_norm))
            .take(MAX_PREFIX_TERMS)
            .flat_map(|(_, routes)| routes.iter().map(String::as_str))
            .filter(|r| seen.insert(*r))
            .collect();
        routes.sort_by_key(|&r| route_order(r));
        routes.truncate(MAX_CANDIDATES);

        Resolution::SearchResults {
            candidates: routes.into_iter().map(str::to_string).collect(),
            query_norm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<SynonymRow> {
        vec![
            SynonymRow::new("BPC 157", "peptide:bpc-157", vec!["bpc-157".into()]),
            SynonymRow::new("bpc", "peptide:bpc-157", vec!["bpc-157".into(), "bpc-157-oral".into()]),
            SynonymRow::new("bpc oral", "peptide:bpc-157-oral", vec!["bpc-157-oral".into()]),
            SynonymRow::new("wolverine", "blend:wolverine", vec!["wolverine".into()]),
            SynonymRow::new("no route", "", vec!["x".into()]),
        ]
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search("  Thymosin β-4 "), "thymosin b-4");
        assert_eq!(normalize_search("CJC–1295 + Ipamorelin"), "cjc-1295 ipamorelin");
        assert_eq!(normalize_search("tb_500 (frag)"), "tb 500 frag");
    }

    #[test]
    fn test_empty_query() {
        let index = SearchIndex::new(&rows());
        assert!(matches!(index.resolve(" ?! "), Resolution::Empty { .. }));
    }

    #[test]
    fn test_strict_term_routes_directly() {
        let index = SearchIndex::new(&rows());
        match index.resolve("BPC 157") {
            Resolution::DirectEntity { route, kind, slug, .. } => {
                assert_eq!(route, "peptide:bpc-157");
                assert_eq!(kind, CompoundKind::Peptide);
                assert_eq!(slug.as_deref(), Some("bpc-157"));
            }
            other => panic!("unexpected {:?}", other),
        }

        match index.resolve("Wolverine!") {
            Resolution::DirectEntity { kind, .. } => assert_eq!(kind, CompoundKind::Blend),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ambiguous_term_gives_search_results() {
        let index = SearchIndex::new(&rows());
        match index.resolve("bpc") {
            Resolution::SearchResults { candidates, .. } => {
                assert_eq!(candidates, vec!["peptide:bpc-157", "peptide:bpc-157-oral"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rows_without_route_skipped() {
        let index = SearchIndex::new(&rows());
        assert_eq!(index.len(), 4);
        assert_eq!(
            index.resolve("no route"),
            Resolution::SearchResults {
                query_norm: "no route".into(),
                candidates: vec![],
            }
        );
    }
}
