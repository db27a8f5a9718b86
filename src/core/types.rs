//! Common type definitions used across the codebase

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::validation::{AgeValidation, WordCountCheck};

/// The two disjoint questionnaire variants an application can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    IdeaStage,
    EarlyRevenueStage,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::IdeaStage, Stage::EarlyRevenueStage];

    /// The opposite stage
    pub fn other(self) -> Stage {
        match self {
            Stage::IdeaStage => Stage::EarlyRevenueStage,
            Stage::EarlyRevenueStage => Stage::IdeaStage,
        }
    }

    /// Prefix shared by every canonical key of this stage
    pub fn key_prefix(self) -> &'static str {
        match self {
            Stage::IdeaStage => "idea_",
            Stage::EarlyRevenueStage => "early_revenue_",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Stage::IdeaStage => "Idea Stage",
            Stage::EarlyRevenueStage => "Early Revenue Stage",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How the stage of a record was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    /// The applicant's declared stage field was recognized
    Declared,
    /// Inferred from stage-specific keys in the answer bag
    Heuristic,
    /// No signal at all
    None,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectionMethod::Declared => "declared",
            DetectionMethod::Heuristic => "heuristic",
            DetectionMethod::None => "none",
        };
        f.write_str(name)
    }
}

/// Non-fatal conditions raised while normalizing a record.
///
/// None of these abort a parse; they travel with the result so a caller can
/// render partial data next to a diagnostic banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Neither a declared value nor the heuristic yielded a stage
    StageUndetected,
    /// Declared stage and heuristic disagree; declared wins
    AmbiguousStageSignal,
    /// A declared stage value was present but not recognized
    UnrecognizedStageValue,
    /// No known answer-bag shape was present
    AnswerSourceNotFound,
    /// A JSON-string answer source failed to parse
    MalformedAnswerSource,
    /// A raw key belongs to the other stage's question set
    ContaminationViolation,
    /// No stored AI evaluation for a question
    EvaluationNotFound,
    /// A stored evaluation uses a key that is not a canonical key of the stage
    EvaluationKeyUnmatched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// A question in the fixed registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDefinition {
    pub canonical_key: &'static str,
    pub display_text: &'static str,
    pub stage: Stage,
    pub order_index: usize,
}

/// A stored AI score attached to one canonical question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationScore {
    pub score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub raw_feedback: String,
}

/// One normalized question/answer entry.
///
/// `stage` always equals the detected stage of the record it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAnswer {
    pub canonical_key: String,
    pub display_text: String,
    pub answer_text: String,
    pub is_answered: bool,
    pub stage: Stage,
    pub order_index: usize,
    pub evaluation: Option<EvaluationScore>,
    pub word_count: WordCountCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageViolation {
    pub raw_key: String,
    pub resolved_key: String,
    pub foreign_stage: Stage,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageValidation {
    pub is_valid: bool,
    pub violations: Vec<StageViolation>,
}

impl StageValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violations: Vec::new(),
        }
    }

    pub fn from_violations(violations: Vec<StageViolation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionInfo {
    pub raw_declared_value: Option<Value>,
    pub method: DetectionMethod,
    pub warnings: Vec<Diagnostic>,
}

/// Where the answer bag of a record was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourcePath {
    /// A field holding an object, e.g. `answers`
    Field(&'static str),
    /// A nested object, e.g. `registration_data.answers`
    Nested(&'static str, &'static str),
    /// A field holding a JSON-encoded object
    JsonString(&'static str),
    /// Answers promoted onto the record itself
    TopLevel,
    NotFound,
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourcePath::Field(field) => f.write_str(field),
            SourcePath::Nested(outer, inner) => write!(f, "{outer}.{inner}"),
            SourcePath::JsonString(field) => write!(f, "{field} (json string)"),
            SourcePath::TopLevel => f.write_str("$root"),
            SourcePath::NotFound => f.write_str("none"),
        }
    }
}

impl Serialize for SourcePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derived, non-persistent validation flags
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFlags {
    pub age: AgeValidation,
    /// Canonical keys whose answers exceed the word cap
    pub over_limit_questions: Vec<String>,
}

/// The normalized view of one application record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrictQuestionnaireResult {
    pub record_id: Option<String>,
    pub detected_stage: Option<Stage>,
    pub questions: Vec<ParsedAnswer>,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub stage_validation: StageValidation,
    pub detection_info: DetectionInfo,
    pub source_path: SourcePath,
    /// Canonical key -> raw key the answer was read from
    pub resolved_keys: BTreeMap<String, String>,
    pub validation_flags: ValidationFlags,
    pub raw_answer_data: Option<Value>,
}

impl StrictQuestionnaireResult {
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.detection_info.warnings
    }

    pub fn has_warning(&self, kind: DiagnosticKind) -> bool {
        self.warnings().iter().any(|w| w.kind == kind)
    }

    /// True when a diagnostic banner should be shown next to the answers
    pub fn needs_attention(&self) -> bool {
        self.detected_stage.is_none()
            || !self.stage_validation.is_valid
            || !self.warnings().is_empty()
    }

    pub fn completion_ratio(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.answered_questions as f64 / self.total_questions as f64
        }
    }

    pub fn question(&self, canonical_key: &str) -> Option<&ParsedAnswer> {
        self.questions
            .iter()
            .find(|q| q.canonical_key == canonical_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_other_is_involution() {
        for stage in Stage::ALL {
            assert_ne!(stage, stage.other());
            assert_eq!(stage, stage.other().other());
        }
    }

    #[test]
    fn test_source_path_serializes_as_string() {
        let json =
            serde_json::to_string(&SourcePath::Nested("registration_data", "answers")).unwrap();
        assert_eq!(json, "\"registration_data.answers\"");
        let json = serde_json::to_string(&SourcePath::JsonString("answers_json")).unwrap();
        assert_eq!(json, "\"answers_json (json string)\"");
    }

    #[test]
    fn test_detection_method_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(DetectionMethod::Heuristic).unwrap(),
            Value::String("heuristic".into())
        );
    }

    #[test]
    fn test_stage_validation_from_violations() {
        assert!(StageValidation::from_violations(Vec::new()).is_valid);
        let violation = StageViolation {
            raw_key: "early_revenue_traction".into(),
            resolved_key: "early_revenue_traction".into(),
            foreign_stage: Stage::EarlyRevenueStage,
            message: String::new(),
        };
        assert!(!StageValidation::from_violations(vec![violation]).is_valid);
    }
}
