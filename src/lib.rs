//! Stage-aware questionnaire normalization for fellowship applications.
//!
//! Applications arrive as loosely-shaped JSON records whose answers may sit
//! under several historical layouts and key spellings. This crate detects
//! which stage questionnaire a record belongs to, resolves every raw key to
//! that stage's canonical questions, and reports any answer that belongs to
//! the other stage instead of silently mixing the two.
//!
//! ```
//! use answermap::{assemble, Stage};
//! use serde_json::json;
//!
//! let result = assemble(&json!({
//!     "product_stage": "idea",
//!     "answers": { "problem": "Permits take months" }
//! }));
//! assert_eq!(result.detected_stage, Some(Stage::IdeaStage));
//! assert_eq!(result.answered_questions, 1);
//! ```

pub mod assembler;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contamination;
pub mod core;
pub mod display;
pub mod evaluation;
pub mod io;
pub mod observability;
pub mod registry;
pub mod resolver;
pub mod sources;
pub mod stage;
pub mod validation;

pub use crate::assembler::{assemble, assemble_with, AssemblerOptions, QuestionnaireAssembler};
pub use crate::contamination::validate_no_stage_mixing;
pub use crate::core::{
    DetectionInfo, DetectionMethod, Diagnostic, DiagnosticKind, Error, EvaluationScore,
    ParsedAnswer, QuestionDefinition, Result, SourcePath, Stage, StageValidation, StageViolation,
    StrictQuestionnaireResult, ValidationFlags,
};
pub use crate::registry::{questions_for, AliasTable};
pub use crate::resolver::{resolve_key, AliasResolver};
pub use crate::sources::{locate_answers, LocatedAnswers, SourceStrategy};
pub use crate::stage::{detect_stage, StageDetection, StageDetector};
pub use crate::validation::{check_word_count, validate_age, AgeValidation, WordCountCheck};
