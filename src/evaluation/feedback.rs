//! Wire contract of the AI-feedback service.
//!
//! The service itself is called elsewhere; these types describe what it
//! accepts and returns so stored results and live responses share one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::EvaluationScore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub question_id: String,
    pub user_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub feedback: String,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackResponse {
    pub fn into_evaluation(self) -> EvaluationScore {
        EvaluationScore {
            score: self.score,
            strengths: self.strengths,
            improvements: self.improvements,
            raw_feedback: self.feedback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackErrorCode {
    NotEnabled,
    AnswerTooShort,
    RateLimited,
    ServiceBusy,
    /// Any code this version does not know about
    #[serde(other)]
    Unknown,
}

impl FeedbackErrorCode {
    /// Whether the presentation layer may offer a retry
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            FeedbackErrorCode::RateLimited | FeedbackErrorCode::ServiceBusy
        )
    }
}

impl fmt::Display for FeedbackErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            FeedbackErrorCode::NotEnabled => "not_enabled",
            FeedbackErrorCode::AnswerTooShort => "answer_too_short",
            FeedbackErrorCode::RateLimited => "rate_limited",
            FeedbackErrorCode::ServiceBusy => "service_busy",
            FeedbackErrorCode::Unknown => "unknown",
        };
        f.write_str(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackFailure {
    pub error: String,
    pub code: FeedbackErrorCode,
    #[serde(default)]
    pub message: String,
}

impl FeedbackFailure {
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

/// Either response body; failures are tried first since they carry `code`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackOutcome {
    Failure(FeedbackFailure),
    Success(FeedbackResponse),
}

impl FeedbackOutcome {
    pub fn into_evaluation(self) -> Option<EvaluationScore> {
        match self {
            FeedbackOutcome::Success(response) => Some(response.into_evaluation()),
            FeedbackOutcome::Failure(_) => None,
        }
    }
}
