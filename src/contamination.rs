//! Cross-stage contamination check.
//!
//! The resolver already refuses foreign keys. This check reports them, so a
//! mistake in the alias tables shows up as a violation on the result instead
//! of silently dropping or misfiling an answer.

use crate::core::{Stage, StageValidation, StageViolation};
use crate::resolver::AliasResolver;

pub fn validate_no_stage_mixing<'k>(
    stage: Stage,
    raw_keys: impl IntoIterator<Item = &'k str>,
) -> StageValidation {
    validate_with(&AliasResolver::standard(), stage, raw_keys)
}

pub fn validate_with<'k>(
    resolver: &AliasResolver<'_>,
    stage: Stage,
    raw_keys: impl IntoIterator<Item = &'k str>,
) -> StageValidation {
    let foreign_stage = stage.other();
    let violations = raw_keys
        .into_iter()
        .filter_map(|raw_key| {
            resolver
                .foreign_resolution(raw_key, stage)
                .map(|resolved_key| StageViolation {
                    raw_key: raw_key.to_string(),
                    resolved_key: resolved_key.to_string(),
                    foreign_stage,
                    message: format!(
                        "'{raw_key}' belongs to the {foreign_stage} question '{resolved_key}'; excluded from {stage} answers"
                    ),
                })
        })
        .collect();

    StageValidation::from_violations(violations)
}
