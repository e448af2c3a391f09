// Integration tests for Pep-Talk
use peptalk_context::{match_context, Considerations, ContextMatcher, ContextPack, MatchConfig, PackCatalog};
use peptalk_core::{CompoundKind, CompoundOption, GoalTable, RiskTier, Stack, StackItemRef, TaxonomyKey};
use peptalk_stack::{find_redundancies, score_candidate, submission_text, CandidateQuery, ScoringWeights, StackScorer};
use peptalk_storage::{Content, EntityType, StackInput, StorageManager, SubmissionInput, SubmissionStatus};
use tempfile::tempdir;

fn peptide(slug: &str, name: &str, keys: &[TaxonomyKey], risk: RiskTier) -> CompoundOption {
    CompoundOption::new(slug, name, CompoundKind::Peptide)
        .with_taxonomy(keys.iter().copied())
        .with_risk(risk)
}

const CATALOG_JSON: &str = r#"{
    "compounds": [
        {"slug": "semaglutide", "name": "Semaglutide", "taxonomy_keys": ["metabolic_weight"], "risk_tier": "moderate"},
        {"slug": "tirzepatide", "name": "Tirzepatide", "taxonomy_keys": ["metabolic_weight"], "risk_tier": "moderate"},
        {"slug": "bpc-157", "name": "BPC-157", "taxonomy_keys": ["regenerative_repair"], "risk_tier": "low"},
        {"slug": "dsip", "name": "DSIP", "taxonomy_keys": ["sleep_circadian"], "risk_tier": "high"}
    ],
    "goals": [{"goal_id": "recovery", "title": "Recovery"}],
    "synonyms": [{"term": "bpc 157", "route": "peptide:bpc-157", "slugs": ["bpc-157"]}]
}"#;

#[test]
fn test_kidney_query_matches_kidney_pack() {
    let packs = vec![ContextPack::new("kidney", "Kidney disease").with_synonyms(["kidney", "kidney problems"])];
    let results = match_context("my kidneys are acting up, thinking about trying this", &packs, 3);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].pack.id, "kidney");
    assert_eq!(results[0].matched_terms, vec!["kidney"]);
}

#[test]
fn test_builtin_packs_rank_dialysis() {
    let matcher = ContextMatcher::from_catalog(PackCatalog::builtin().unwrap(), MatchConfig::default());
    let results = matcher.best_matches("kidney failure on dialysis");

    assert!(!results.is_empty());
    assert_eq!(results[0].pack.id, "pt_ctx_kidney_disease_ckd");
    assert!(results[0].matched_terms.iter().any(|t| t == "dialysis"));
    assert!(results.iter().all(|m| m.score > 0.18 && m.score <= 1.0));

    let notes = Considerations::render_all(&results, "BPC-157", "kidney failure on dialysis");
    assert_eq!(notes.len(), results.len());
    assert_eq!(notes[0].pack_id, "pt_ctx_kidney_disease_ckd");
    assert!(!notes[0].context_summary.is_empty());
}

#[test]
fn test_nonsense_query_matches_nothing() {
    let matcher = ContextMatcher::from_catalog(PackCatalog::builtin().unwrap(), MatchConfig::default());
    assert!(matcher.best_matches("").is_empty());
    assert!(matcher.best_matches("zzqx qqvv").is_empty());
}

#[test]
fn test_metabolic_redundancy() {
    let stack = vec![
        peptide("semaglutide", "Semaglutide", &[TaxonomyKey::MetabolicWeight], RiskTier::Moderate),
        peptide("tirzepatide", "Tirzepatide", &[TaxonomyKey::MetabolicWeight], RiskTier::Moderate),
    ];

    let found = find_redundancies(&stack);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].key, TaxonomyKey::MetabolicWeight);
    assert_eq!(found[0].names, vec!["Semaglutide", "Tirzepatide"]);
}

#[test]
fn test_complementary_low_risk_candidate_scores_five() {
    let stack = vec![peptide("a", "CompoundA", &[TaxonomyKey::MetabolicWeight], RiskTier::Moderate)];
    let c = peptide("c", "CompoundC", &[TaxonomyKey::RegenerativeRepair], RiskTier::Low);
    assert_eq!(score_candidate(&c, &stack, None), 5);
}

#[test]
fn test_goal_bonus_is_exactly_four() {
    let stack = vec![peptide("a", "CompoundA", &[TaxonomyKey::MetabolicWeight], RiskTier::Moderate)];
    let c = peptide("c", "CompoundC", &[TaxonomyKey::RegenerativeRepair], RiskTier::Low);
    let scorer = StackScorer::new(ScoringWeights::default(), GoalTable::default());

    let without = scorer.score(&c, &stack, None);
    let with = scorer.score(&c, &stack, Some("recovery"));
    assert_eq!(with - without, 4);
}

#[test]
fn test_fully_covered_candidate_is_never_suggested() {
    let content = Content::from_json_str(CATALOG_JSON).unwrap();
    let mut stack = Stack::new("Cut");
    stack.push(content.compounds.require("semaglutide").unwrap().clone());

    let scorer = StackScorer::default();
    let report = scorer.suggest(content.compounds.compounds(), &stack, &CandidateQuery::default(), 5);

    let tirzepatide = report
        .candidates
        .iter()
        .find(|c| c.compound.slug == "tirzepatide")
        .unwrap();
    assert!(tirzepatide.score <= 0);
    assert!(report.suggestions.iter().all(|c| c.score > 0));
    assert!(report.suggestions.iter().all(|c| c.compound.slug != "tirzepatide"));
    assert_eq!(report.suggestions[0].compound.slug, "bpc-157");
}

#[test]
fn test_saved_stack_round_trip_through_storage() {
    let dir = tempdir().unwrap();
    let content = Content::from_json_str(CATALOG_JSON).unwrap();

    let id = {
        let storage = StorageManager::new(dir.path()).unwrap();
        let saved = storage
            .stacks()
            .upsert(StackInput {
                name: "  Recovery   ".into(),
                goal_id: Some("recovery".into()),
                items: vec![
                    StackItemRef { kind: CompoundKind::Peptide, slug: "bpc-157".into() },
                    StackItemRef { kind: CompoundKind::Peptide, slug: "retired-peptide".into() },
                ],
                ..StackInput::default()
            })
            .unwrap();
        assert_eq!(saved.name, "Recovery");
        saved.id
    };

    let storage = StorageManager::new(dir.path()).unwrap();
    let saved = storage.stacks().get(&id).unwrap();
    let stack = Stack::hydrate(&saved.name, saved.goal_id.clone(), &saved.items, &content.compounds);
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.items[0].slug, "bpc-157");

    let text = submission_text(&stack, content.goal("recovery").map(|g| g.title.as_str()));
    let queued = storage
        .submissions()
        .submit(SubmissionInput {
            entity_type: EntityType::Stack,
            slug: String::new(),
            username: "sam".into(),
            text,
            ack_no_dosing: true,
        })
        .unwrap();
    assert_eq!(queued.status, SubmissionStatus::Pending);
    assert_eq!(storage.submissions().list(SubmissionStatus::Pending).len(), 1);
}

#[test]
fn test_catalog_file_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, CATALOG_JSON).unwrap();

    let content = StorageManager::load_content(Some(&path)).unwrap();
    assert_eq!(content.compounds.len(), 4);
    assert_eq!(content.synonyms.len(), 1);

    assert!(StorageManager::load_content(Some(&dir.path().join("missing.json"))).is_err());
    assert!(StorageManager::load_content(None).unwrap().compounds.is_empty());
}
