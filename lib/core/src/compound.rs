//! Compound catalog entries
//!
//! A [`CompoundOption`] is one row of the stackable catalog. Rows are loaded
//! once per session and never mutated by the engines.

use crate::TaxonomyKey;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Whether a catalog entry is a single peptide or a pre-mixed blend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundKind {
    #[default]
    Peptide,
    Blend,
}

impl CompoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundKind::Peptide => "peptide",
            CompoundKind::Blend => "blend",
        }
    }

    /// Anything other than `blend` is treated as a peptide
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("blend") {
            CompoundKind::Blend
        } else {
            CompoundKind::Peptide
        }
    }
}

impl fmt::Display for CompoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse safety tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
            RiskTier::Unknown => "unknown",
        }
    }

    /// Unrecognized or missing tiers collapse to `Unknown`
    pub fn parse_lenient(s: Option<&str>) -> Self {
        match s.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("low") => RiskTier::Low,
            Some("moderate") => RiskTier::Moderate,
            Some("high") => RiskTier::High,
            _ => RiskTier::Unknown,
        }
    }
}

/// Strength of the supporting research.
///
/// Variants are declared strongest first, so `a < b` means `a` is the
/// stronger grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceGrade {
    RegulatoryLabel,
    RctMeta,
    Rct,
    HumanInterventional,
    HumanObservational,
    Animal,
    InVitro,
    MechanisticOnly,
    Unknown,
}

impl EvidenceGrade {
    pub const ALL: [EvidenceGrade; 9] = [
        EvidenceGrade::RegulatoryLabel,
        EvidenceGrade::RctMeta,
        EvidenceGrade::Rct,
        EvidenceGrade::HumanInterventional,
        EvidenceGrade::HumanObservational,
        EvidenceGrade::Animal,
        EvidenceGrade::InVitro,
        EvidenceGrade::MechanisticOnly,
        EvidenceGrade::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceGrade::RegulatoryLabel => "regulatory_label",
            EvidenceGrade::RctMeta => "rct_meta",
            EvidenceGrade::Rct => "rct",
            EvidenceGrade::HumanInterventional => "human_interventional",
            EvidenceGrade::HumanObservational => "human_observational",
            EvidenceGrade::Animal => "animal",
            EvidenceGrade::InVitro => "in_vitro",
            EvidenceGrade::MechanisticOnly => "mechanistic_only",
            EvidenceGrade::Unknown => "unknown",
        }
    }

    /// Badge text shown next to a compound
    pub fn short_label(&self) -> &'static str {
        match self {
            EvidenceGrade::RegulatoryLabel => "Approved",
            EvidenceGrade::RctMeta => "Meta-RCT",
            EvidenceGrade::Rct => "RCT",
            EvidenceGrade::HumanInterventional => "Human",
            EvidenceGrade::HumanObservational => "Observational",
            EvidenceGrade::Animal => "Animal",
            EvidenceGrade::InVitro => "In vitro",
            EvidenceGrade::MechanisticOnly => "Mechanistic",
            EvidenceGrade::Unknown => "Unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        EvidenceGrade::ALL.iter().copied().find(|g| g.as_str() == s)
    }
}

/// A catalog entry eligible for stacking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundOption {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub kind: CompoundKind,
    /// Category tags; treated as a set
    #[serde(default, deserialize_with = "distinct_keys")]
    pub taxonomy_keys: Vec<TaxonomyKey>,
    #[serde(default)]
    pub risk_tier: RiskTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_grade: Option<EvidenceGrade>,
    /// Informational only, never used for ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}

fn distinct_keys<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<TaxonomyKey>, D::Error> {
    let raw = Vec::<TaxonomyKey>::deserialize(deserializer)?;
    let mut keys = Vec::with_capacity(raw.len());
    for key in raw {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

impl CompoundOption {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, kind: CompoundKind) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            kind,
            taxonomy_keys: Vec::new(),
            risk_tier: RiskTier::Unknown,
            evidence_grade: None,
            risk_score: None,
        }
    }

    /// Set taxonomy keys, dropping repeats while keeping first-seen order
    pub fn with_taxonomy<I: IntoIterator<Item = TaxonomyKey>>(mut self, keys: I) -> Self {
        self.taxonomy_keys.clear();
        for key in keys {
            if !self.taxonomy_keys.contains(&key) {
                self.taxonomy_keys.push(key);
            }
        }
        self
    }

    pub fn with_risk(mut self, tier: RiskTier) -> Self {
        self.risk_tier = tier;
        self
    }

    pub fn with_evidence(mut self, grade: EvidenceGrade) -> Self {
        self.evidence_grade = Some(grade);
        self
    }

    #[inline]
    pub fn has_key(&self, key: TaxonomyKey) -> bool {
        self.taxonomy_keys.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_collapse_on_deserialize() {
        let c: CompoundOption = serde_json::from_str(
            r#"{"slug": "a", "name": "A", "taxonomy_keys": ["metabolic_weight", "sleep_circadian", "metabolic_weight"]}"#,
        )
        .unwrap();
        assert_eq!(c.taxonomy_keys, vec![TaxonomyKey::MetabolicWeight, TaxonomyKey::SleepCircadian]);

        let bare: CompoundOption = serde_json::from_str(r#"{"slug": "b", "name": "B"}"#).unwrap();
        assert!(bare.taxonomy_keys.is_empty());
    }

    #[test]
    fn test_evidence_grade_ordering() {
        assert!(EvidenceGrade::RegulatoryLabel < EvidenceGrade::Rct);
        assert!(EvidenceGrade::Animal < EvidenceGrade::InVitro);
        assert_eq!(EvidenceGrade::ALL.iter().min(), Some(&EvidenceGrade::RegulatoryLabel));
        assert_eq!(EvidenceGrade::parse("human_observational"), Some(EvidenceGrade::HumanObservational));
        assert_eq!(EvidenceGrade::parse("anecdotal"), None);
    }

    #[test]
    fn test_risk_tier_lenient() {
        assert_eq!(RiskTier::parse_lenient(Some(" High ")), RiskTier::High);
        assert_eq!(RiskTier::parse_lenient(Some("severe")), RiskTier::Unknown);
        assert_eq!(RiskTier::parse_lenient(None), RiskTier::Unknown);

        let tier: RiskTier = serde_json::from_str("\"catastrophic\"").unwrap();
        assert_eq!(tier, RiskTier::Unknown);
    }

    #[test]
    fn test_with_taxonomy_dedupes() {
        let c = CompoundOption::new("bpc-157", "BPC-157", CompoundKind::Peptide).with_taxonomy([
            TaxonomyKey::RegenerativeRepair,
            TaxonomyKey::ImmunomodulatoryInflammation,
            TaxonomyKey::RegenerativeRepair,
        ]);
        assert_eq!(c.taxonomy_keys.len(), 2);
        assert!(c.has_key(TaxonomyKey::ImmunomodulatoryInflammation));
    }

    #[test]
    fn test_compound_defaults_on_deserialize() {
        let c: CompoundOption =
            serde_json::from_str(r#"{"slug": "kpv", "name": "KPV"}"#).unwrap();
        assert_eq!(c.kind, CompoundKind::Peptide);
        assert_eq!(c.risk_tier, RiskTier::Unknown);
        assert!(c.taxonomy_keys.is_empty());
        assert!(c.evidence_grade.is_none());
    }
}
