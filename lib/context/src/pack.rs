//! Context pack definitions
//!
//! A context pack is a named health/life context (a condition, a medication
//! class, a life stage) with the phrases people use to describe it and the
//! explanatory copy shown once it matches. Packs are data: they are loaded
//! once and never mutated.

use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_PACKS: &str = include_str!("../data/context_packs.json");

/// How much attention a context deserves before starting a compound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// No direct concern
    Low,
    /// Worth monitoring
    Watch,
    /// Discuss before starting
    Flag,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Low => "Low concern",
            Signal::Watch => "Worth watching",
            Signal::Flag => "Real consideration",
        }
    }
}

/// Explanatory copy for a pack.
///
/// Each template may reference `{peptide}` (the subject compound's display
/// name) and `{query}` (the user's raw text). Rendering is pure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationTemplates {
    /// One-sentence verdict shown first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_note: Option<String>,
    pub context_summary: String,
    pub what_is_known: String,
    pub what_is_unclear: String,
    pub why_experiences_vary: String,
}

impl ExplanationTemplates {
    /// Substitute `{peptide}` and `{query}` in a single pass, so values that
    /// themselves contain placeholders are left alone.
    pub fn render(template: &str, peptide: &str, query: &str) -> String {
        let mut out = String::with_capacity(template.len() + peptide.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            if let Some(after) = tail.strip_prefix("{peptide}") {
                out.push_str(peptide);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{query}") {
                out.push_str(query);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

/// A named, matchable concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPack {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<Signal>,
    #[serde(default)]
    pub templates: ExplanationTemplates,
}

impl ContextPack {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            synonyms: Vec::new(),
            signal: None,
            templates: ExplanationTemplates::default(),
        }
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn with_templates(mut self, templates: ExplanationTemplates) -> Self {
        self.templates = templates;
        self
    }
}

/// An ordered, validated set of context packs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackCatalog {
    #[serde(default = "default_version")]
    pub version: u32,
    pub packs: Vec<ContextPack>,
}

fn default_version() -> u32 {
    1
}

impl PackCatalog {
    pub fn new(packs: Vec<ContextPack>) -> Result<Self, CatalogError> {
        let catalog = Self { version: 1, packs };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The packs shipped with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_PACKS)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: PackCatalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Read(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Ids must be non-empty and unique; labels must be non-empty
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = ahash::AHashSet::with_capacity(self.packs.len());
        for pack in &self.packs {
            if pack.id.trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if pack.label.trim().is_empty() {
                return Err(CatalogError::EmptyLabel(pack.id.clone()));
            }
            if !seen.insert(pack.id.as_str()) {
                return Err(CatalogError::DuplicateId(pack.id.clone()));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ContextPack> {
        self.packs.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn into_packs(self) -> Vec<ContextPack> {
        self.packs
    }
}

/// Errors raised while loading a pack catalog
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Pack id cannot be empty")]
    EmptyId,

    #[error("Pack '{0}' has an empty label")]
    EmptyLabel(String),

    #[error("Duplicate pack id '{0}'")]
    DuplicateId(String),

    #[error("Failed to parse pack catalog: {0}")]
    Parse(String),

    #[error("Failed to read pack catalog: {0}")]
    Read(String),
}

impl From<CatalogError> for peptalk_core::Error {
    fn from(e: CatalogError) -> Self {
        peptalk_core::Error::InvalidCatalog(e.to_string())
    }
}
