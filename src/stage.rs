//! Stage detection.
//!
//! The applicant's declared stage is authoritative. The answer-bag heuristic
//! only fills in when nothing usable was declared, and otherwise serves to
//! flag declarations that disagree with the submitted answers.
//!
//! The heuristic is symmetric: keys exclusive to early revenue select that
//! stage, keys exclusive to the idea stage select the idea stage, and
//! revenue keys win when both are present.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::core::{DetectionMethod, Diagnostic, DiagnosticKind, Stage};
use crate::resolver::AliasResolver;
use crate::sources::{locate_answers, LocatedAnswers};
use crate::validation::{is_answered, unwrap_value};

/// Fields that have held the declared stage, probed on the record and then
/// inside the answer bag
pub const DECLARED_STAGE_FIELDS: &[&str] =
    &["product_stage", "productStage", "stage", "startup_stage"];

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_\-]+").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct StageDetection {
    pub stage: Option<Stage>,
    pub raw_declared_value: Option<Value>,
    pub method: DetectionMethod,
    pub warnings: Vec<Diagnostic>,
}

/// Stage-exclusive keys found in an answer bag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeuristicSignal {
    pub idea_keys: Vec<String>,
    pub early_revenue_keys: Vec<String>,
}

impl HeuristicSignal {
    /// Revenue-specific keys win over idea-specific ones
    pub fn stage(&self) -> Option<Stage> {
        if !self.early_revenue_keys.is_empty() {
            Some(Stage::EarlyRevenueStage)
        } else if !self.idea_keys.is_empty() {
            Some(Stage::IdeaStage)
        } else {
            None
        }
    }

    pub fn keys_for(&self, stage: Stage) -> &[String] {
        match stage {
            Stage::IdeaStage => &self.idea_keys,
            Stage::EarlyRevenueStage => &self.early_revenue_keys,
        }
    }
}

/// Map a declared stage string onto a [`Stage`]
pub fn parse_declared_stage(raw: &str) -> Option<Stage> {
    let lowered = raw.trim().to_lowercase();
    let collapsed = SEPARATORS.replace_all(&lowered, " ");
    let normalized = collapsed.trim();
    let normalized = normalized.strip_suffix(" stage").unwrap_or(normalized);

    match normalized {
        "idea" | "ideation" | "concept" | "pre revenue" | "prerevenue" => Some(Stage::IdeaStage),
        "early revenue" | "earlyrevenue" | "revenue" | "revenue generating" => {
            Some(Stage::EarlyRevenueStage)
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StageDetector<'a> {
    resolver: AliasResolver<'a>,
}

impl StageDetector<'static> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for StageDetector<'static> {
    fn default() -> Self {
        Self {
            resolver: AliasResolver::standard(),
        }
    }
}

impl<'a> StageDetector<'a> {
    pub fn with_resolver(resolver: AliasResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Decide the stage of a record whose answer bag is already located
    pub fn detect(&self, record: &Value, answers: &LocatedAnswers) -> StageDetection {
        let mut warnings = Vec::new();
        let (declared, raw_declared_value) = match declared_stage(record, answers) {
            DeclaredStage::Recognized(stage, raw) => (Some(stage), Some(raw)),
            DeclaredStage::Unrecognized(raw) => {
                warnings.push(Diagnostic::new(
                    DiagnosticKind::UnrecognizedStageValue,
                    format!("declared stage {raw} is not a recognized stage"),
                ));
                (None, Some(raw))
            }
            DeclaredStage::Absent => (None, None),
        };

        let signal = self.heuristic(answers);
        let inferred = signal.stage();

        let (stage, method) = match (declared, inferred) {
            (Some(declared), inferred) => {
                if let Some(inferred) = inferred.filter(|s| *s != declared) {
                    warnings.push(Diagnostic::new(
                        DiagnosticKind::AmbiguousStageSignal,
                        format!(
                            "declared {declared} but answers contain {} keys ({}); using declared stage",
                            inferred,
                            signal.keys_for(inferred).join(", ")
                        ),
                    ));
                }
                (Some(declared), DetectionMethod::Declared)
            }
            (None, Some(inferred)) => (Some(inferred), DetectionMethod::Heuristic),
            (None, None) => {
                warnings.push(Diagnostic::new(
                    DiagnosticKind::StageUndetected,
                    "no declared stage and no stage-specific answer keys",
                ));
                (None, DetectionMethod::None)
            }
        };

        debug!(?stage, %method, warnings = warnings.len(), "stage detected");

        StageDetection {
            stage,
            raw_declared_value,
            method,
            warnings,
        }
    }

    /// Collect stage-exclusive keys from the answer bag
    pub fn heuristic(&self, answers: &LocatedAnswers) -> HeuristicSignal {
        answers
            .keys()
            .fold(HeuristicSignal::default(), |mut signal, key| {
                // a key foreign to one stage belongs to the other
                if self.resolver.is_foreign(key, Stage::IdeaStage) {
                    signal.early_revenue_keys.push(key.to_string());
                } else if self.resolver.is_foreign(key, Stage::EarlyRevenueStage) {
                    signal.idea_keys.push(key.to_string());
                }
                signal
            })
    }
}

enum DeclaredStage {
    Recognized(Stage, Value),
    /// Only unrecognized values were present; holds the first of them
    Unrecognized(Value),
    Absent,
}

/// First recognized declared stage across all candidate fields, probed on the
/// record and then in the bag. An unrelated value in an earlier field (e.g. a
/// generic `stage` holding a pipeline status) does not hide a later one.
fn declared_stage(record: &Value, answers: &LocatedAnswers) -> DeclaredStage {
    let on_record = DECLARED_STAGE_FIELDS
        .iter()
        .filter_map(|field| record.get(*field));
    let in_bag = DECLARED_STAGE_FIELDS
        .iter()
        .filter_map(|field| answers.get(field));

    let mut first_unrecognized = None;
    for value in on_record.chain(in_bag).filter(|v| is_answered(Some(*v))) {
        match unwrap_value(value).as_str().and_then(parse_declared_stage) {
            Some(stage) => return DeclaredStage::Recognized(stage, value.clone()),
            None => {
                first_unrecognized.get_or_insert(value);
            }
        }
    }

    match first_unrecognized {
        Some(value) => DeclaredStage::Unrecognized(value.clone()),
        None => DeclaredStage::Absent,
    }
}

/// Detect the stage of a record, locating its answer bag with the default strategies
pub fn detect_stage(record: &Value) -> StageDetection {
    let answers = locate_answers(record);
    StageDetector::default().detect(record, &answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_declared_stage_aliases() {
        for raw in ["idea", "Idea Stage", "idea_stage", "IDEA-STAGE", " ideation "] {
            assert_eq!(parse_declared_stage(raw), Some(Stage::IdeaStage), "{raw}");
        }
        for raw in [
            "early_revenue",
            "early-revenue",
            "Early Revenue Stage",
            "early revenue",
            "earlyrevenue",
            "revenue-generating",
        ] {
            assert_eq!(
                parse_declared_stage(raw),
                Some(Stage::EarlyRevenueStage),
                "{raw}"
            );
        }
        assert_eq!(parse_declared_stage("growth"), None);
        assert_eq!(parse_declared_stage(""), None);
    }

    #[test]
    fn test_declared_stage_wins() {
        let record = json!({ "product_stage": "idea", "answers": { "idea_problem": "p" } });
        let detection = detect_stage(&record);
        assert_eq!(detection.stage, Some(Stage::IdeaStage));
        assert_eq!(detection.method, DetectionMethod::Declared);
        assert_eq!(detection.raw_declared_value, Some(json!("idea")));
        assert!(detection.warnings.is_empty());
    }

    #[test]
    fn test_conflict_warns_but_declared_wins() {
        let record = json!({
            "product_stage": "idea",
            "answers": { "early_revenue_traction": "$2k MRR" }
        });
        let detection = detect_stage(&record);
        assert_eq!(detection.stage, Some(Stage::IdeaStage));
        assert_eq!(detection.method, DetectionMethod::Declared);
        assert_eq!(detection.warnings.len(), 1);
        assert_eq!(detection.warnings[0].kind, DiagnosticKind::AmbiguousStageSignal);
        assert!(detection.warnings[0].message.contains("early_revenue_traction"));
    }

    #[test]
    fn test_heuristic_fallback() {
        let record = json!({ "answers": { "early_revenue_monetization": "subscriptions" } });
        let detection = detect_stage(&record);
        assert_eq!(detection.stage, Some(Stage::EarlyRevenueStage));
        assert_eq!(detection.method, DetectionMethod::Heuristic);
        assert_eq!(detection.raw_declared_value, None);
    }

    #[test]
    fn test_heuristic_ignores_shared_short_names() {
        let record = json!({ "answers": { "problem": "p", "solution": "s" } });
        let detection = detect_stage(&record);
        assert_eq!(detection.stage, None);
        assert_eq!(detection.method, DetectionMethod::None);
        assert_eq!(detection.warnings[0].kind, DiagnosticKind::StageUndetected);
    }

    #[test]
    fn test_unrecognized_declared_value_falls_back() {
        let record = json!({ "stage": "series-b", "answers": { "team": "two founders" } });
        let detection = detect_stage(&record);
        assert_eq!(detection.stage, Some(Stage::IdeaStage));
        assert_eq!(detection.method, DetectionMethod::Heuristic);
        assert_eq!(detection.raw_declared_value, Some(json!("series-b")));
        assert_eq!(
            detection.warnings[0].kind,
            DiagnosticKind::UnrecognizedStageValue
        );
    }

    #[test]
    fn test_declared_inside_bag_and_wrapped() {
        let record = json!({
            "product_stage": "",
            "answers": { "productStage": { "value": "Early Revenue" }, "problem": "p" }
        });
        let detection = detect_stage(&record);
        assert_eq!(detection.stage, Some(Stage::EarlyRevenueStage));
        assert_eq!(detection.method, DetectionMethod::Declared);
    }

    #[test]
    fn test_unrelated_stage_field_does_not_hide_declared_stage() {
        let record = json!({
            "stage": "submitted",
            "answers": { "product_stage": "early_revenue", "problem": "X solves Y" }
        });
        let detection = detect_stage(&record);
        assert_eq!(detection.stage, Some(Stage::EarlyRevenueStage));
        assert_eq!(detection.method, DetectionMethod::Declared);
        assert_eq!(detection.raw_declared_value, Some(json!("early_revenue")));
        assert!(!detection
            .warnings
            .iter()
            .any(|w| w.kind == DiagnosticKind::UnrecognizedStageValue));
    }

    #[test]
    fn test_first_unrecognized_value_reported_when_none_recognized() {
        let record = json!({
            "stage": "submitted",
            "answers": { "product_stage": "series-b", "mrr": "$1k" }
        });
        let detection = detect_stage(&record);
        assert_eq!(detection.raw_declared_value, Some(json!("submitted")));
        assert_eq!(detection.method, DetectionMethod::Heuristic);
        assert_eq!(
            detection
                .warnings
                .iter()
                .filter(|w| w.kind == DiagnosticKind::UnrecognizedStageValue)
                .count(),
            1
        );
    }

    #[test]
    fn test_nothing_at_all() {
        let detection = detect_stage(&json!({}));
        assert_eq!(detection.stage, None);
        assert_eq!(detection.warnings.len(), 1);
    }
}
