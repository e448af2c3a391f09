//! Content loading: compound catalog, goal options and search synonyms
//!
//! Rows are validated leniently. A bad row is dropped with a warning rather
//! than failing the whole load.

use anyhow::{Context, Result};
use peptalk_context::SynonymRow;
use peptalk_core::{
    CompoundCatalog, CompoundKind, CompoundOption, EvidenceGrade, GoalOption, RiskTier, TaxonomyKey,
};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Everything the engines read, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub compounds: CompoundCatalog,
    pub goals: Vec<GoalOption>,
    pub synonyms: Vec<SynonymRow>,
}

impl Content {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading content file {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("loading {}", path.display()))
    }

    /// Accepts `{"compounds": [...], "goals": [...], "synonyms": [...]}` or a
    /// bare array of compound rows
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(json)?;

        let (compound_rows, goal_rows, synonym_rows) = match &doc {
            Value::Array(rows) => (rows.as_slice(), &[][..], &[][..]),
            Value::Object(map) => (
                array_field(map.get("compounds")),
                array_field(map.get("goals")),
                array_field(map.get("synonyms").or_else(|| map.get("entity_synonyms"))),
            ),
            _ => anyhow::bail!("content must be an object or an array of compounds"),
        };

        let compounds = parse_compounds(compound_rows)?;
        let goals = parse_goals(goal_rows);
        let synonyms = parse_synonyms(synonym_rows);
        debug!(
            "Loaded {} compounds, {} goals, {} synonym rows",
            compounds.len(),
            goals.len(),
            synonyms.len()
        );

        Ok(Self {
            compounds,
            goals,
            synonyms,
        })
    }

    pub fn goal(&self, goal_id: &str) -> Option<&GoalOption> {
        self.goals.iter().find(|g| g.goal_id == goal_id)
    }
}

fn array_field(v: Option<&Value>) -> &[Value] {
    match v {
        Some(Value::Array(rows)) => rows.as_slice(),
        _ => &[],
    }
}

fn str_field<'a>(row: &'a Value, key: &str) -> Option<&'a str> {
    row.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse compound rows; duplicates keep the first occurrence
pub fn parse_compounds(rows: &[Value]) -> Result<CompoundCatalog> {
    let mut compounds: Vec<CompoundOption> = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let Some(compound) = parse_compound(idx, row) else {
            continue;
        };
        if compounds.iter().any(|c| c.slug == compound.slug) {
            warn!("Dropping compound row {}: duplicate slug '{}'", idx, compound.slug);
            continue;
        }
        compounds.push(compound);
    }

    CompoundCatalog::new(compounds).map_err(|e| anyhow::anyhow!(e))
}

fn parse_compound(idx: usize, row: &Value) -> Option<CompoundOption> {
    let (Some(slug), Some(name)) = (str_field(row, "slug"), str_field(row, "name")) else {
        warn!("Dropping compound row {}: missing slug or name", idx);
        return None;
    };

    let kind = str_field(row, "kind")
        .or_else(|| str_field(row, "type"))
        .map(CompoundKind::parse_lenient)
        .unwrap_or_default();

    let mut keys = Vec::new();
    for raw in array_field(row.get("taxonomy_keys")) {
        match raw.as_str().map(str::parse::<TaxonomyKey>) {
            Some(Ok(key)) => keys.push(key),
            _ => warn!("Compound '{}': dropping unknown taxonomy key {}", slug, raw),
        }
    }

    let mut compound = CompoundOption::new(slug, name, kind)
        .with_taxonomy(keys)
        .with_risk(RiskTier::parse_lenient(str_field(row, "risk_tier")));
    compound.evidence_grade = str_field(row, "evidence_grade").and_then(EvidenceGrade::parse);
    compound.risk_score = row.get("risk_score").and_then(Value::as_f64);
    Some(compound)
}

fn parse_goals(rows: &[Value]) -> Vec<GoalOption> {
    rows.iter()
        .enumerate()
        .filter_map(|(idx, row)| match (str_field(row, "goal_id"), str_field(row, "title")) {
            (Some(goal_id), Some(title)) => Some(GoalOption {
                goal_id: goal_id.to_string(),
                title: title.to_string(),
            }),
            _ => {
                warn!("Dropping goal row {}: missing goal_id or title", idx);
                None
            }
        })
        .collect()
}

fn parse_synonyms(rows: &[Value]) -> Vec<SynonymRow> {
    rows.iter()
        .filter_map(|row| serde_json::from_value::<SynonymRow>(row.clone()).ok())
        .filter(|row| !row.term.trim().is_empty())
        .collect()
}
