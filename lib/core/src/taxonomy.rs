//! Taxonomy vocabulary
//!
//! The fixed set of physiological/effect domains a compound can target.
//! Declaration order is the display order used by category filters.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One tag from the fixed taxonomy vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyKey {
    MetabolicWeight,
    MusclePerformance,
    RegenerativeRepair,
    EndocrineHormonal,
    NeurocognitiveMood,
    MitochondrialLongevity,
    ImmunomodulatoryInflammation,
    SexualHealthReproduction,
    CosmeticTopical,
    SleepCircadian,
    AntimicrobialInnate,
}

impl TaxonomyKey {
    /// Every key, in display order
    pub const ALL: [TaxonomyKey; 11] = [
        TaxonomyKey::MetabolicWeight,
        TaxonomyKey::MusclePerformance,
        TaxonomyKey::RegenerativeRepair,
        TaxonomyKey::EndocrineHormonal,
        TaxonomyKey::NeurocognitiveMood,
        TaxonomyKey::MitochondrialLongevity,
        TaxonomyKey::ImmunomodulatoryInflammation,
        TaxonomyKey::SexualHealthReproduction,
        TaxonomyKey::CosmeticTopical,
        TaxonomyKey::SleepCircadian,
        TaxonomyKey::AntimicrobialInnate,
    ];

    /// Stable wire name (`metabolic_weight`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonomyKey::MetabolicWeight => "metabolic_weight",
            TaxonomyKey::MusclePerformance => "muscle_performance",
            TaxonomyKey::RegenerativeRepair => "regenerative_repair",
            TaxonomyKey::EndocrineHormonal => "endocrine_hormonal",
            TaxonomyKey::NeurocognitiveMood => "neurocognitive_mood",
            TaxonomyKey::MitochondrialLongevity => "mitochondrial_longevity",
            TaxonomyKey::ImmunomodulatoryInflammation => "immunomodulatory_inflammation",
            TaxonomyKey::SexualHealthReproduction => "sexual_health_reproduction",
            TaxonomyKey::CosmeticTopical => "cosmetic_topical",
            TaxonomyKey::SleepCircadian => "sleep_circadian",
            TaxonomyKey::AntimicrobialInnate => "antimicrobial_innate",
        }
    }

    /// Human-readable category label
    pub fn label(&self) -> &'static str {
        match self {
            TaxonomyKey::MetabolicWeight => "Metabolic & Weight",
            TaxonomyKey::MusclePerformance => "Muscle & Performance",
            TaxonomyKey::RegenerativeRepair => "Recovery & Repair",
            TaxonomyKey::EndocrineHormonal => "Hormonal",
            TaxonomyKey::NeurocognitiveMood => "Brain & Mood",
            TaxonomyKey::MitochondrialLongevity => "Longevity",
            TaxonomyKey::ImmunomodulatoryInflammation => "Immune",
            TaxonomyKey::SexualHealthReproduction => "Sexual Health",
            TaxonomyKey::CosmeticTopical => "Skin & Cosmetic",
            TaxonomyKey::SleepCircadian => "Sleep",
            TaxonomyKey::AntimicrobialInnate => "Antimicrobial",
        }
    }
}

impl fmt::Display for TaxonomyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxonomyKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        TaxonomyKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| Error::UnknownTaxonomyKey(key.to_string()))
    }
}
