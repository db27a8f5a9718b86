//! Answer presence, age, and word-count validation.
//!
//! All checks work on values already extracted from a record and report
//! their outcome as data. Nothing here fails or panics on malformed input.

pub mod age;
pub mod answer;
pub mod word_count;

pub use age::{
    age_on, parse_date_of_birth, validate_age, validate_age_with, AgeBounds, AgeValidation,
};
pub use answer::{is_answered, render_answer_text, unwrap_value};
pub use word_count::{check_word_count, count_words, WordCountCheck, DEFAULT_WORD_LIMIT};
