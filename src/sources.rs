//! Answer-bag location across legacy record shapes.
//!
//! Records written by different form versions keep their answers in
//! different places. Each known place is a named [`SourceStrategy`]; the
//! locator probes them in order and takes the first non-empty object.

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{Diagnostic, DiagnosticKind, SourcePath, Stage};
use crate::resolver::AliasResolver;

/// One known storage location for an answer bag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStrategy {
    /// A top-level field holding an object
    Field(&'static str),
    /// An object nested one level down
    Nested(&'static str, &'static str),
    /// Top-level fields holding JSON-encoded objects, tried in order
    JsonString(&'static [&'static str]),
    /// The record itself, for answers promoted to the top level
    TopLevel,
}

/// Probe order used by [`locate_answers`]
pub const DEFAULT_STRATEGIES: &[SourceStrategy] = &[
    SourceStrategy::Field("answers"),
    SourceStrategy::Field("questionnaire_answers"),
    SourceStrategy::Nested("registration_data", "answers"),
    SourceStrategy::JsonString(&["answers_json", "answers", "questionnaire_answers"]),
    SourceStrategy::TopLevel,
];

/// Outcome of probing a single strategy
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    Found(Map<String, Value>, SourcePath),
    /// Nothing usable here; any diagnostics explain why
    Missing(Vec<Diagnostic>),
}

impl SourceStrategy {
    pub fn probe(&self, record: &Value, resolver: &AliasResolver<'_>) -> Probe {
        match *self {
            SourceStrategy::Field(field) => non_empty_object(record.get(field))
                .map(|map| Probe::Found(map.clone(), SourcePath::Field(field)))
                .unwrap_or(Probe::Missing(Vec::new())),
            SourceStrategy::Nested(outer, inner) => {
                non_empty_object(record.get(outer).and_then(|o| o.get(inner)))
                    .map(|map| Probe::Found(map.clone(), SourcePath::Nested(outer, inner)))
                    .unwrap_or(Probe::Missing(Vec::new()))
            }
            SourceStrategy::JsonString(fields) => probe_json_strings(record, fields),
            SourceStrategy::TopLevel => probe_top_level(record, resolver),
        }
    }
}

fn non_empty_object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value
        .and_then(Value::as_object)
        .filter(|map| !map.is_empty())
}

fn probe_json_strings(record: &Value, fields: &'static [&'static str]) -> Probe {
    let mut warnings = Vec::new();

    for &field in fields {
        let Some(text) = record.get(field).and_then(Value::as_str) else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) if !map.is_empty() => {
                return Probe::Found(map, SourcePath::JsonString(field));
            }
            Ok(Value::Object(_)) | Ok(Value::Null) => {}
            Ok(other) => warnings.push(Diagnostic::new(
                DiagnosticKind::MalformedAnswerSource,
                format!(
                    "{field} holds JSON {} instead of an object; ignored",
                    json_type_name(&other)
                ),
            )),
            Err(e) => {
                debug!(field, error = %e, "answer source is not valid JSON");
                warnings.push(Diagnostic::new(
                    DiagnosticKind::MalformedAnswerSource,
                    format!("{field} could not be parsed as JSON: {e}"),
                ));
            }
        }
    }

    Probe::Missing(warnings)
}

fn probe_top_level(record: &Value, resolver: &AliasResolver<'_>) -> Probe {
    let Some(map) = record.as_object() else {
        return Probe::Missing(Vec::new());
    };

    let has_question_keys = map.keys().any(|key| {
        Stage::ALL
            .iter()
            .any(|stage| resolver.table(*stage).contains(key))
    });

    if has_question_keys {
        Probe::Found(map.clone(), SourcePath::TopLevel)
    } else {
        Probe::Missing(Vec::new())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The answer bag of a record, if any
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedAnswers {
    pub data: Option<Map<String, Value>>,
    pub source_path: SourcePath,
    pub warnings: Vec<Diagnostic>,
}

impl LocatedAnswers {
    /// Raw keys of the bag in sorted order; empty when nothing was found
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.iter().flat_map(|map| map.keys().map(String::as_str))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data
            .iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn get(&self, raw_key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|map| map.get(raw_key))
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locate the answer bag using [`DEFAULT_STRATEGIES`]
pub fn locate_answers(record: &Value) -> LocatedAnswers {
    locate_answers_with(record, DEFAULT_STRATEGIES, &AliasResolver::standard())
}

pub fn locate_answers_with(
    record: &Value,
    strategies: &[SourceStrategy],
    resolver: &AliasResolver<'_>,
) -> LocatedAnswers {
    let mut warnings = Vec::new();

    for strategy in strategies {
        match strategy.probe(record, resolver) {
            Probe::Found(data, source_path) => {
                debug!(%source_path, keys = data.len(), "located answer bag");
                return LocatedAnswers {
                    data: Some(data),
                    source_path,
                    warnings,
                };
            }
            Probe::Missing(mut diagnostics) => warnings.append(&mut diagnostics),
        }
    }

    warnings.push(Diagnostic::new(
        DiagnosticKind::AnswerSourceNotFound,
        "no answer bag found on the record; treating it as 0 answers",
    ));

    LocatedAnswers {
        data: None,
        source_path: SourcePath::NotFound,
        warnings,
    }
}
