//! Categorical overlap inside a stack

use peptalk_core::{CompoundOption, TaxonomyKey};
use serde::Serialize;

/// A taxonomy key carried by two or more stack items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redundancy {
    pub key: TaxonomyKey,
    pub label: &'static str,
    /// Names of every item carrying the key, in stack order
    pub names: Vec<String>,
}

/// One entry per key shared by at least two items, ordered by the key's
/// first appearance in the stack
pub fn find_redundancies(stack_items: &[CompoundOption]) -> Vec<Redundancy> {
    let mut groups: Vec<(TaxonomyKey, Vec<String>)> = Vec::new();

    for item in stack_items {
        for (idx, key) in item.taxonomy_keys.iter().enumerate() {
            // an item counts once per key even if it lists the key twice
            if item.taxonomy_keys[..idx].contains(key) {
                continue;
            }
            match groups.iter_mut().find(|(k, _)| k == key) {
                Some((_, names)) => names.push(item.name.clone()),
                None => groups.push((*key, vec![item.name.clone()])),
            }
        }
    }

    groups
        .into_iter()
        .filter(|(_, names)| names.len() >= 2)
        .map(|(key, names)| Redundancy {
            key,
            label: key.label(),
            names,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use peptalk_core::CompoundKind;

    fn compound(name: &str, keys: &[TaxonomyKey]) -> CompoundOption {
        CompoundOption::new(name.to_lowercase(), name, CompoundKind::Peptide).with_taxonomy(keys.iter().copied())
    }

    #[test]
    fn test_shared_metabolic_key() {
        let items = vec![
            compound("CompoundA", &[TaxonomyKey::MetabolicWeight]),
            compound("CompoundB", &[TaxonomyKey::MetabolicWeight]),
        ];
        let report = find_redundancies(&items);

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].key, TaxonomyKey::MetabolicWeight);
        assert_eq!(report[0].label, "Metabolic & Weight");
        assert_eq!(report[0].names, vec!["CompoundA", "CompoundB"]);
    }

    #[test]
    fn test_item_listing_key_twice_is_not_redundant_alone() {
        let mut doubled = compound("CompoundA", &[]);
        doubled.taxonomy_keys = vec![TaxonomyKey::MetabolicWeight, TaxonomyKey::MetabolicWeight];
        assert!(find_redundancies(&[doubled.clone()]).is_empty());

        let report = find_redundancies(&[doubled, compound("CompoundB", &[TaxonomyKey::MetabolicWeight])]);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].names, vec!["CompoundA", "CompoundB"]);
    }

    #[test]
    fn test_entry_disappears_below_two() {
        let mut items = vec![
            compound("A", &[TaxonomyKey::SleepCircadian, TaxonomyKey::NeurocognitiveMood]),
            compound("B", &[TaxonomyKey::NeurocognitiveMood]),
            compound("C", &[TaxonomyKey::SleepCircadian, TaxonomyKey::NeurocognitiveMood]),
        ];
        let keys: Vec<_> = find_redundancies(&items).iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![TaxonomyKey::SleepCircadian, TaxonomyKey::NeurocognitiveMood]);

        items.remove(2);
        let report = find_redundancies(&items);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].key, TaxonomyKey::NeurocognitiveMood);

        items.remove(1);
        assert!(find_redundancies(&items).is_empty());
    }

    #[test]
    fn test_empty_stack() {
        assert!(find_redundancies(&[]).is_empty());
    }
}
