//! Presentation-facing text for validation results.

use crate::core::StrictQuestionnaireResult;
use crate::validation::{AgeValidation, WordCountCheck};

/// `"N / cap words"`, with `" (Over limit by X words)"` appended when over
pub fn format_word_count(check: &WordCountCheck) -> String {
    let base = format!("{} / {} words", check.count, check.cap);
    match check.message() {
        Some(message) => format!("{base} ({message})"),
        None => base,
    }
}

/// `"N years (Valid)"` or the validator's error
pub fn format_age(validation: &AgeValidation) -> String {
    match (validation.is_valid, validation.age, validation.error.as_deref()) {
        (true, Some(age), _) => format!("{age} years (Valid)"),
        (_, _, Some(error)) => error.to_string(),
        (_, Some(age), None) => format!("{age} years"),
        (_, None, None) => "Unknown".to_string(),
    }
}

pub fn format_progress(result: &StrictQuestionnaireResult) -> String {
    format!(
        "{}/{} answered",
        result.answered_questions, result.total_questions
    )
}

pub fn format_stage(result: &StrictQuestionnaireResult) -> String {
    match result.detected_stage {
        Some(stage) => format!("{} ({})", stage, result.detection_info.method),
        None => "Undetected".to_string(),
    }
}
