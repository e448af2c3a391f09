//! Rendered "considerations" for a matched context
//!
//! Turns a [`ContextMatch`] plus the subject compound's name into display
//! copy. Blocks whose template renders empty fall back to generic text that
//! still names the query and the compound.

use crate::matcher::ContextMatch;
use crate::pack::{ExplanationTemplates, Signal};
use serde::Serialize;

/// Typeahead result count
pub const SUGGESTION_LIMIT: usize = 6;

/// Display copy for one matched context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Considerations {
    pub pack_id: String,
    pub label: String,
    pub score: f64,
    pub matched_terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<Signal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_note: Option<String>,
    pub context_summary: String,
    pub what_is_known: String,
    pub what_is_unclear: String,
    /// No generic fallback; empty when the pack has nothing to say
    pub why_experiences_vary: String,
}

impl Considerations {
    pub fn render(matched: &ContextMatch<'_>, peptide: &str, query: &str) -> Self {
        let pack = matched.pack;
        let templates = &pack.templates;
        let query = query.trim();
        let fill = |t: &str| ExplanationTemplates::render(t, peptide, query).trim().to_string();

        Self {
            pack_id: pack.id.clone(),
            label: pack.label.clone(),
            score: matched.score,
            matched_terms: matched.matched_terms.clone(),
            signal: pack.signal,
            signal_label: pack.signal.map(|s| s.label()),
            signal_note: templates
                .signal_note
                .as_deref()
                .map(fill)
                .filter(|s| !s.is_empty()),
            context_summary: non_empty_or(fill(&templates.context_summary), || {
                fallback_summary(peptide, query)
            }),
            what_is_known: non_empty_or(fill(&templates.what_is_known), || fallback_known(query)),
            what_is_unclear: non_empty_or(fill(&templates.what_is_unclear), || {
                fallback_unclear(query)
            }),
            why_experiences_vary: fill(&templates.why_experiences_vary),
        }
    }

    /// Render every match in order
    pub fn render_all(matches: &[ContextMatch<'_>], peptide: &str, query: &str) -> Vec<Self> {
        matches
            .iter()
            .map(|m| Self::render(m, peptide, query))
            .collect()
    }
}

fn non_empty_or(rendered: String, fallback: impl FnOnce() -> String) -> String {
    if rendered.is_empty() {
        fallback()
    } else {
        rendered
    }
}

fn fallback_summary(peptide: &str, query: &str) -> String {
    format!(
        "If you have \"{query}\", it's worth thinking about how {peptide} might interact with your \
         baseline, since the picture can look different depending on your starting point."
    )
}

fn fallback_known(query: &str) -> String {
    format!(
        "The most consistent finding is that people with \"{query}\" should track closely in the \
         first 4-6 weeks. Early effects on energy, appetite, and sleep are the clearest signals \
         worth noting."
    )
}

fn fallback_unclear(query: &str) -> String {
    format!(
        "Most studies didn't include people with \"{query}\", so the evidence is extrapolated \
         rather than direct."
    )
}
