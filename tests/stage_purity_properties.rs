//! Property-based tests for stage purity
//!
//! These tests verify invariants that should hold for all answer bags:
//! - Every listed question belongs to the detected stage
//! - Foreign keys never leak into answers and always show up as violations
//! - Assembly is deterministic
//! - Alias spellings and canonical keys produce the same questionnaire

use answermap::registry::aliases::{EARLY_REVENUE_STAGE_ALIASES, IDEA_STAGE_ALIASES};
use answermap::registry::table_for;
use answermap::{
    assemble_with, questions_for, AliasResolver, AssemblerOptions, Stage,
    StrictQuestionnaireResult,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn options() -> AssemblerOptions {
    AssemblerOptions::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

fn all_known_keys() -> Vec<&'static str> {
    IDEA_STAGE_ALIASES
        .iter()
        .chain(EARLY_REVENUE_STAGE_ALIASES.iter())
        .map(|(raw, _)| *raw)
        .chain(Stage::ALL.iter().flat_map(|s| questions_for(*s).iter().map(|q| q.canonical_key)))
        .collect()
}

/// Mix of known keys and noise keys, each with a short answer
fn answer_bag() -> impl Strategy<Value = Map<String, Value>> {
    let known = all_known_keys();
    let key = prop_oneof![
        3 => proptest::sample::select(known).prop_map(String::from),
        1 => "[a-z]{3,10}",
    ];
    proptest::collection::btree_map(key, "[a-z ]{1,30}", 0..12)
        .prop_map(|bag| bag.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
}

fn declared_stage() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("idea")),
        Just(Some("early_revenue")),
        Just(Some("unknown")),
    ]
}

fn record(stage: Option<&str>, bag: &Map<String, Value>) -> Value {
    let mut record = json!({ "answers": bag });
    if let Some(stage) = stage {
        record["product_stage"] = json!(stage);
    }
    record
}

fn assemble(record: &Value) -> StrictQuestionnaireResult {
    assemble_with(record, options())
}

proptest! {
    /// Property: every question comes from the detected stage's registry,
    /// in registry order
    #[test]
    fn prop_questions_belong_to_detected_stage(
        stage in declared_stage(),
        bag in answer_bag()
    ) {
        let result = assemble(&record(stage, &bag));
        match result.detected_stage {
            Some(detected) => {
                let expected: Vec<_> = questions_for(detected)
                    .iter()
                    .map(|q| q.canonical_key.to_string())
                    .collect();
                let actual: Vec<_> = result
                    .questions
                    .iter()
                    .map(|q| q.canonical_key.clone())
                    .collect();
                prop_assert_eq!(actual, expected);
                prop_assert!(result.questions.iter().all(|q| q.stage == detected));
            }
            None => prop_assert!(result.questions.is_empty()),
        }
    }

    /// Property: a key foreign to the detected stage is reported as a
    /// violation and never supplies an answer
    #[test]
    fn prop_foreign_keys_are_reported_not_used(
        stage in declared_stage(),
        bag in answer_bag()
    ) {
        let result = assemble(&record(stage, &bag));
        if let Some(detected) = result.detected_stage {
            let resolver = AliasResolver::standard();
            let foreign: Vec<_> = bag
                .keys()
                .filter(|key| resolver.is_foreign(key, detected))
                .cloned()
                .collect();
            let reported: Vec<_> = result
                .stage_validation
                .violations
                .iter()
                .map(|v| v.raw_key.clone())
                .collect();
            prop_assert_eq!(&reported, &foreign);
            prop_assert_eq!(result.stage_validation.is_valid, foreign.is_empty());
            for raw in result.resolved_keys.values() {
                prop_assert!(!foreign.contains(raw));
            }
        }
    }

    /// Property: assembling the same record twice gives identical output
    #[test]
    fn prop_assembly_is_deterministic(
        stage in declared_stage(),
        bag in answer_bag()
    ) {
        let record = record(stage, &bag);
        let first = serde_json::to_value(assemble(&record)).unwrap();
        let second = serde_json::to_value(assemble(&record)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: answering under any alias is the same as answering under
    /// the canonical key
    #[test]
    fn prop_alias_equivalence(
        (stage, raw_key, canonical_key) in proptest::sample::select(
            IDEA_STAGE_ALIASES
                .iter()
                .map(|(raw, canonical)| (Stage::IdeaStage, *raw, *canonical))
                .chain(
                    EARLY_REVENUE_STAGE_ALIASES
                        .iter()
                        .map(|(raw, canonical)| (Stage::EarlyRevenueStage, *raw, *canonical)),
                )
                .collect::<Vec<_>>()
        ),
        answer in "[a-z]{1,10}( [a-z]{1,10}){0,5}"
    ) {
        let declared = match stage {
            Stage::IdeaStage => "idea",
            Stage::EarlyRevenueStage => "early_revenue",
        };
        let via_alias = assemble(&json!({
            "product_stage": declared,
            "answers": { raw_key: answer.clone() }
        }));
        let via_canonical = assemble(&json!({
            "product_stage": declared,
            "answers": { canonical_key: answer }
        }));
        prop_assert_eq!(
            serde_json::to_value(&via_alias.questions).unwrap(),
            serde_json::to_value(&via_canonical.questions).unwrap()
        );
        prop_assert!(table_for(stage).contains(raw_key));
    }
}
