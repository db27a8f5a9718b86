pub mod errors;
pub mod types;

pub use errors::{Error, Result, ResultExt};
pub use types::{
    DetectionInfo, DetectionMethod, Diagnostic, DiagnosticKind, EvaluationScore, ParsedAnswer,
    QuestionDefinition, SourcePath, Stage, StageValidation, StageViolation,
    StrictQuestionnaireResult, ValidationFlags,
};
