use readiness_core::barriers::{
    BarrierCatalog, BarrierList, BarrierSeverity, BarrierSource, BarrierStatus, RuleTableError,
    SuggestionEngine, SuggestionRules, SUGGESTION_THRESHOLD,
};
use readiness_core::readiness::{
    AssessmentScores, Dimension, DimensionScores, ReadinessEngine, SubComponentScores,
};
use std::collections::BTreeMap;
use std::io::Cursor;

fn codes(suggestions: &[readiness_core::barriers::BarrierSuggestion]) -> Vec<&str> {
    suggestions
        .iter()
        .map(|suggestion| suggestion.code.as_str())
        .collect()
}

#[test]
fn standard_bank_covers_every_rule_and_keeps_structural_barriers_unlinked() {
    let catalog = BarrierCatalog::standard();
    let rules = SuggestionRules::standard();

    assert_eq!(catalog.len(), 23);
    assert_eq!(rules.verify(&catalog), Ok(()));

    let structural: Vec<_> = catalog
        .cross_cutting()
        .map(|entry| entry.code.as_str())
        .collect();
    assert!(structural.contains(&"transport_issues"));
    for code in structural {
        for dimension in Dimension::ordered() {
            assert!(
                !rules.codes_for(dimension).iter().any(|rule| rule == code),
                "{code} should never be suggested"
            );
        }
    }
}

#[test]
fn suggestions_fire_at_threshold_in_rule_order() {
    let engine = SuggestionEngine::default();
    let catalog = BarrierCatalog::standard();

    let at_threshold = engine.suggest(Dimension::Search, SUGGESTION_THRESHOLD, &catalog);
    assert_eq!(
        codes(&at_threshold),
        vec!["no_cv", "no_job_portal_activity", "low_interview_confidence"]
    );
    assert_eq!(at_threshold[0].label, "No CV / Poor CV");
    assert_eq!(at_threshold[0].severity, BarrierSeverity::High);
    assert!(at_threshold
        .iter()
        .all(|suggestion| suggestion.dimension == Dimension::Search));

    assert!(engine
        .suggest(Dimension::Search, SUGGESTION_THRESHOLD + 1, &catalog)
        .is_empty());
    assert_eq!(engine.suggest(Dimension::Learning, 1, &catalog).len(), 1);
}

#[test]
fn repeated_calls_return_identical_ordered_suggestions() {
    let engine = SuggestionEngine::default();
    let catalog = BarrierCatalog::standard();

    for dimension in Dimension::ordered() {
        let first = engine.suggest(dimension, 2, &catalog);
        let second = engine.suggest(dimension, 2, &catalog);
        assert!(!first.is_empty(), "{dimension}");
        assert_eq!(first, second, "{dimension}");
    }

    let assessment = ReadinessEngine::default()
        .assess(&AssessmentScores::WeightedPercentage(DimensionScores::uniform(1)));
    let first = engine.suggest_for_assessment(&assessment, &catalog);
    let second = engine.suggest_for_assessment(&assessment, &catalog);
    assert_eq!(first.len(), 19);
    assert_eq!(codes(&first), codes(&second));
    assert_eq!(first, second);
}

#[test]
fn assessment_suggestions_use_rounded_dimension_averages() {
    let mut scores = SubComponentScores::uniform(5);
    // (3 + 3 + 4) / 3 rounds to 3, (3 + 4 + 4) / 3 rounds to 4
    scores.set_dimension(Dimension::Career, [3, 3, 4]);
    scores.set_dimension(Dimension::Resilience, [3, 4, 4]);

    let assessment = ReadinessEngine::default().assess(&AssessmentScores::SubComponentSum(scores));
    let suggestions =
        SuggestionEngine::default().suggest_for_assessment(&assessment, &BarrierCatalog::standard());

    assert_eq!(
        codes(&suggestions),
        vec!["lack_career_direction", "limited_work_experience"]
    );
}

#[test]
fn weighted_sessions_suggest_in_dimension_order() {
    let mut scores = DimensionScores::uniform(6);
    scores.set(Dimension::Support, 1);
    scores.set(Dimension::Financial, 3);

    let assessment =
        ReadinessEngine::default().assess(&AssessmentScores::WeightedPercentage(scores));
    let suggestions =
        SuggestionEngine::default().suggest_for_assessment(&assessment, &BarrierCatalog::standard());

    assert_eq!(
        codes(&suggestions),
        vec![
            "financial_pressure",
            "family_dependency",
            "no_budgeting_skills",
            "limited_social_support",
            "cultural_constraints",
            "environmental_instability",
        ]
    );
}

#[test]
fn rule_tables_naming_unknown_codes_are_rejected() {
    let rules = SuggestionRules::new(BTreeMap::from([(
        Dimension::Motivation,
        vec!["low_motivation".to_string(), "burnout".to_string()],
    )]));

    match SuggestionEngine::verified(rules, &BarrierCatalog::standard()) {
        Err(RuleTableError::UnknownCodes { codes }) => assert_eq!(codes, vec!["burnout"]),
        other => panic!("expected unknown code error, got {other:?}"),
    }
}

#[test]
fn custom_banks_load_from_json_and_skip_absent_codes() {
    let json = r#"[
        {"code": "low_motivation", "label": "Low drive", "category": "Mindset",
         "default_severity": "Low", "dimension": "motivation"},
        {"code": "childcare", "label": "Childcare", "category": "Structural",
         "default_severity": "High"}
    ]"#;
    let catalog = BarrierCatalog::from_reader(Cursor::new(json)).expect("bank parses");

    assert!(SuggestionRules::standard().verify(&catalog).is_err());

    let suggestions = SuggestionEngine::default().suggest(Dimension::Motivation, 2, &catalog);
    assert_eq!(codes(&suggestions), vec!["low_motivation"]);
    assert_eq!(suggestions[0].label, "Low drive");
    assert_eq!(suggestions[0].severity, BarrierSeverity::Low);
}

#[test]
fn accepted_suggestions_and_manual_barriers_stay_unique() {
    let catalog = BarrierCatalog::standard();
    let suggestions = SuggestionEngine::default().suggest(Dimension::Motivation, 2, &catalog);
    let mut barriers = BarrierList::new();

    for suggestion in &suggestions {
        assert!(barriers.accept(suggestion));
    }
    assert!(!barriers.accept(&suggestions[0]));

    let transport = catalog.find("transport_issues").expect("structural barrier");
    assert!(barriers.add_manual(transport, Some(BarrierSeverity::High), None));
    assert!(!barriers.add_manual(transport, None, None));
    assert!(barriers.resolve("low_motivation"));

    assert_eq!(barriers.len(), 3);
    assert_eq!(barriers.active().count(), 2);
    let records = barriers.records();
    assert_eq!(records[0].source, BarrierSource::Auto);
    assert_eq!(records[0].status, BarrierStatus::Resolved);
    assert_eq!(records[2].source, BarrierSource::Manual);
    assert_eq!(records[2].severity, BarrierSeverity::High);
    assert_eq!(records[2].dimension, None);
}
