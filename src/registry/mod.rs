//! Hand-maintained registries: question definitions and alias tables.

pub mod aliases;
pub mod questions;

pub use aliases::{normalize_key, table_for, AliasTable};
pub use questions::{
    all_questions, definition, is_canonical_key, questions_for, stage_of,
    EARLY_REVENUE_STAGE_QUESTIONS, IDEA_STAGE_QUESTIONS,
};
