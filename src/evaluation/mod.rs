//! Stored AI evaluation scores.
//!
//! The evaluation blob lives beside the answer bag, shaped as
//! `{ "scores": { "<canonical key>": { score, strengths, ... } } }`. Scores
//! are matched to questions by exact canonical key only.

pub mod feedback;

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::core::{Diagnostic, DiagnosticKind, EvaluationScore, Stage};
use crate::registry;

pub use feedback::{
    FeedbackErrorCode, FeedbackFailure, FeedbackOutcome, FeedbackRequest, FeedbackResponse,
};

/// Record fields that have held the evaluation blob, in probe order
pub const EVALUATION_FIELDS: &[&str] = &["ai_evaluation", "evaluation", "ai_feedback"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationBlob {
    scores: BTreeMap<String, EvaluationScore>,
}

impl EvaluationBlob {
    /// Score stored under exactly this key
    pub fn score_for(&self, canonical_key: &str) -> Option<&EvaluationScore> {
        self.scores.get(canonical_key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Warnings for stored scores that no question of `stage` will receive
    pub fn unmatched_warnings(&self, stage: Stage) -> Vec<Diagnostic> {
        self.keys()
            .filter(|key| !registry::is_canonical_key(key, stage))
            .map(|key| {
                Diagnostic::new(
                    DiagnosticKind::EvaluationKeyUnmatched,
                    format!(
                        "evaluation stored under '{key}' is not a {stage} question key; not attached"
                    ),
                )
            })
            .collect()
    }
}

/// Read the evaluation blob from a record; absent or malformed blobs are empty
pub fn locate_evaluation(record: &Value) -> EvaluationBlob {
    EVALUATION_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .find_map(scores_object)
        .map(|scores| EvaluationBlob {
            scores: scores
                .iter()
                .filter_map(|(key, entry)| parse_score(key, entry).map(|s| (key.clone(), s)))
                .collect(),
        })
        .unwrap_or_default()
}

fn scores_object(blob: &Value) -> Option<Map<String, Value>> {
    let parsed;
    let blob = match blob {
        Value::String(text) => {
            parsed = serde_json::from_str::<Value>(text).ok()?;
            &parsed
        }
        other => other,
    };
    blob.get("scores")
        .and_then(Value::as_object)
        .filter(|scores| !scores.is_empty())
        .cloned()
}

fn parse_score(key: &str, entry: &Value) -> Option<EvaluationScore> {
    let score = match entry.get("score") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|score| score.is_finite());
    let Some(score) = score else {
        debug!(key, "evaluation entry without a numeric score skipped");
        return None;
    };

    let improvements = entry
        .get("areas_for_improvement")
        .or_else(|| entry.get("improvements"));
    let raw_feedback = entry
        .get("raw_feedback")
        .or_else(|| entry.get("feedback"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(EvaluationScore {
        score,
        strengths: string_list(entry.get("strengths")),
        improvements: string_list(improvements),
        raw_feedback: raw_feedback.to_string(),
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}
