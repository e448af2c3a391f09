//! Read-only compound catalog with slug lookup

use crate::{CompoundOption, Error, Result};
use ahash::AHashMap;

/// All stackable compounds for a session
#[derive(Debug, Clone, Default)]
pub struct CompoundCatalog {
    compounds: Vec<CompoundOption>,
    by_slug: AHashMap<String, usize>,
}

impl CompoundCatalog {
    /// Build a catalog; slugs must be unique
    pub fn new(compounds: Vec<CompoundOption>) -> Result<Self> {
        let mut by_slug = AHashMap::with_capacity(compounds.len());
        for (idx, compound) in compounds.iter().enumerate() {
            if by_slug.insert(compound.slug.clone(), idx).is_some() {
                return Err(Error::DuplicateId(compound.slug.clone()));
            }
        }
        Ok(Self { compounds, by_slug })
    }

    #[inline]
    pub fn get(&self, slug: &str) -> Option<&CompoundOption> {
        self.by_slug.get(slug).map(|&idx| &self.compounds[idx])
    }

    pub fn require(&self, slug: &str) -> Result<&CompoundOption> {
        self.get(slug)
            .ok_or_else(|| Error::CompoundNotFound(slug.to_string()))
    }

    #[inline]
    pub fn compounds(&self) -> &[CompoundOption] {
        &self.compounds
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompoundOption> {
        self.compounds.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompoundKind;

    #[test]
    fn test_lookup_by_slug() {
        let catalog = CompoundCatalog::new(vec![
            CompoundOption::new("tb-500", "TB-500", CompoundKind::Peptide),
            CompoundOption::new("glow", "GLOW", CompoundKind::Blend),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("glow").map(|c| c.kind), Some(CompoundKind::Blend));
        assert!(catalog.get("missing").is_none());
        assert!(matches!(catalog.require("missing"), Err(Error::CompoundNotFound(_))));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let result = CompoundCatalog::new(vec![
            CompoundOption::new("kpv", "KPV", CompoundKind::Peptide),
            CompoundOption::new("kpv", "KPV again", CompoundKind::Peptide),
        ]);
        assert!(matches!(result, Err(Error::DuplicateId(slug)) if slug == "kpv"));
    }
}
