//! Questionnaire assembly.
//!
//! Combines stage detection, answer location, alias resolution and
//! validation into one [`StrictQuestionnaireResult`]. The list of questions
//! is always the detected stage's registry, in registry order, whatever raw
//! keys the record happens to carry.

use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, debug_span};

use crate::config::AnswermapConfig;
use crate::contamination;
use crate::core::{
    DetectionInfo, ParsedAnswer, QuestionDefinition, StageValidation, StrictQuestionnaireResult,
    ValidationFlags,
};
use crate::evaluation::{locate_evaluation, EvaluationBlob};
use crate::registry;
use crate::resolver::AliasResolver;
use crate::sources::{locate_answers_with, LocatedAnswers, DEFAULT_STRATEGIES};
use crate::stage::StageDetector;
use crate::validation::{
    check_word_count, is_answered, render_answer_text, unwrap_value, validate_age_with, AgeBounds,
    DEFAULT_WORD_LIMIT,
};

/// Record fields that have held the applicant's date of birth
pub const DATE_OF_BIRTH_FIELDS: &[&str] = &["date_of_birth", "dateOfBirth", "dob"];

/// Record fields that have held the record identifier
pub const RECORD_ID_FIELDS: &[&str] = &["id", "application_id", "_id"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    pub word_limit: usize,
    pub age_bounds: AgeBounds,
    /// "Today" for age calculation; fixed per assembler so results are repeatable
    pub reference_date: NaiveDate,
}

impl AssemblerOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            word_limit: DEFAULT_WORD_LIMIT,
            age_bounds: AgeBounds::default(),
            reference_date,
        }
    }

    pub fn from_config(config: &AnswermapConfig, reference_date: NaiveDate) -> Self {
        Self {
            word_limit: config.validation.word_limit,
            age_bounds: config.validation.age_bounds(),
            reference_date,
        }
    }
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QuestionnaireAssembler<'a> {
    resolver: AliasResolver<'a>,
    options: AssemblerOptions,
}

impl QuestionnaireAssembler<'static> {
    pub fn new(options: AssemblerOptions) -> Self {
        Self {
            resolver: AliasResolver::standard(),
            options,
        }
    }
}

impl<'a> QuestionnaireAssembler<'a> {
    pub fn with_resolver(resolver: AliasResolver<'a>, options: AssemblerOptions) -> Self {
        Self { resolver, options }
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    pub fn assemble(&self, record: &Value) -> StrictQuestionnaireResult {
        let record_id = record_id(record);
        let _span = debug_span!("assemble", record_id = record_id.as_deref()).entered();

        let answers = locate_answers_with(record, DEFAULT_STRATEGIES, &self.resolver);
        let detection = StageDetector::with_resolver(self.resolver).detect(record, &answers);
        let evaluations = locate_evaluation(record);

        let mut warnings = answers.warnings.clone();
        warnings.extend(detection.warnings);

        let age = validate_age_with(
            date_of_birth(record, &answers).as_deref(),
            self.options.reference_date,
            self.options.age_bounds,
        );

        let Some(stage) = detection.stage else {
            debug!("no stage detected; returning empty questionnaire");
            return StrictQuestionnaireResult {
                record_id,
                detected_stage: None,
                questions: Vec::new(),
                total_questions: 0,
                answered_questions: 0,
                stage_validation: StageValidation::valid(),
                detection_info: DetectionInfo {
                    raw_declared_value: detection.raw_declared_value,
                    method: detection.method,
                    warnings,
                },
                source_path: answers.source_path,
                resolved_keys: BTreeMap::new(),
                validation_flags: ValidationFlags {
                    age,
                    over_limit_questions: Vec::new(),
                },
                raw_answer_data: answers.data.map(Value::Object),
            };
        };

        let stage_validation =
            contamination::validate_with(&self.resolver, stage, answers.keys());
        warnings.extend(evaluations.unmatched_warnings(stage));

        let mut resolved_keys = BTreeMap::new();
        let questions: Vec<ParsedAnswer> = registry::questions_for(stage)
            .iter()
            .map(|definition| {
                let raw = self.find_raw_answer(&answers, definition);
                if let Some((raw_key, _)) = raw {
                    resolved_keys
                        .insert(definition.canonical_key.to_string(), raw_key.to_string());
                }
                self.parse_answer(definition, raw.map(|(_, v)| v), &evaluations)
            })
            .collect();

        let answered_questions = questions.iter().filter(|q| q.is_answered).count();
        let over_limit_questions = questions
            .iter()
            .filter(|q| q.word_count.is_over_limit())
            .map(|q| q.canonical_key.clone())
            .collect();

        debug!(
            %stage,
            answered = answered_questions,
            total = questions.len(),
            violations = stage_validation.violations.len(),
            "questionnaire assembled"
        );

        StrictQuestionnaireResult {
            record_id,
            detected_stage: Some(stage),
            total_questions: questions.len(),
            answered_questions,
            questions,
            stage_validation,
            detection_info: DetectionInfo {
                raw_declared_value: detection.raw_declared_value,
                method: detection.method,
                warnings,
            },
            source_path: answers.source_path,
            resolved_keys,
            validation_flags: ValidationFlags {
                age,
                over_limit_questions,
            },
            raw_answer_data: answers.data.map(Value::Object),
        }
    }

    /// Assemble many records in parallel; output order follows input order
    pub fn assemble_batch(&self, records: &[Value]) -> Vec<StrictQuestionnaireResult> {
        records
            .par_iter()
            .map(|record| self.assemble(record))
            .collect()
    }

    /// Raw entry for a definition. The canonical spelling is preferred, then
    /// the first alias (in key order) holding an answer, then the first alias.
    fn find_raw_answer<'r>(
        &self,
        answers: &'r LocatedAnswers,
        definition: &QuestionDefinition,
    ) -> Option<(&'r str, &'r Value)> {
        let stage = definition.stage;
        let candidates: Vec<(&str, &Value)> = answers
            .entries()
            .filter(|(raw_key, _)| {
                self.resolver.resolve_key(raw_key, stage) == Some(definition.canonical_key)
            })
            .collect();

        candidates
            .iter()
            .find(|(raw_key, value)| {
                *raw_key == definition.canonical_key && is_answered(Some(*value))
            })
            .or_else(|| candidates.iter().find(|(_, value)| is_answered(Some(*value))))
            .or_else(|| candidates.first())
            .copied()
    }

    fn parse_answer(
        &self,
        definition: &QuestionDefinition,
        raw: Option<&Value>,
        evaluations: &EvaluationBlob,
    ) -> ParsedAnswer {
        let answer_text = render_answer_text(raw);
        let word_count = check_word_count(&answer_text, self.options.word_limit);

        ParsedAnswer {
            canonical_key: definition.canonical_key.to_string(),
            display_text: definition.display_text.to_string(),
            is_answered: is_answered(raw),
            answer_text,
            stage: definition.stage,
            order_index: definition.order_index,
            evaluation: evaluations.score_for(definition.canonical_key).cloned(),
            word_count,
        }
    }
}

impl Default for QuestionnaireAssembler<'static> {
    fn default() -> Self {
        Self::new(AssemblerOptions::default())
    }
}

fn record_id(record: &Value) -> Option<String> {
    RECORD_ID_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn date_of_birth(record: &Value, answers: &LocatedAnswers) -> Option<String> {
    let on_record = DATE_OF_BIRTH_FIELDS
        .iter()
        .filter_map(|field| record.get(*field));
    let in_bag = DATE_OF_BIRTH_FIELDS
        .iter()
        .filter_map(|field| answers.get(field));

    on_record
        .chain(in_bag)
        .map(unwrap_value)
        .find_map(|value| value.as_str().filter(|s| !s.trim().is_empty()))
        .map(String::from)
}

/// Assemble one record with default options (today's date, default limits)
pub fn assemble(record: &Value) -> StrictQuestionnaireResult {
    QuestionnaireAssembler::default().assemble(record)
}

/// Assemble one record with explicit options
pub fn assemble_with(record: &Value, options: AssemblerOptions) -> StrictQuestionnaireResult {
    QuestionnaireAssembler::new(options).assemble(record)
}
