//! CLI command implementations for answermap.
//!
//! Available commands:
//! - **parse**: Normalize records into stage-pure questionnaires
//! - **check**: Summarize stage detection and contamination per record
//! - **registry**: Print the question registry and accepted aliases
//! - **init**: Initialize a new `.answermap.toml` configuration file

pub mod check;
pub mod init;
pub mod parse;
pub mod registry;

pub use check::{check_records, CheckConfig, CheckSummary};
pub use init::init_config;
pub use parse::{parse_records, ParseConfig};
pub use registry::{print_registry, render_registry};

use crate::config::{self, AnswermapConfig};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::path::Path;

/// Explicit `--config` files must load; otherwise search upwards
pub(crate) fn resolve_config(explicit: Option<&Path>) -> Result<AnswermapConfig> {
    match explicit {
        Some(path) => Ok(config::load_config_from(path)?),
        None => Ok(config::load_config()),
    }
}

/// Parse `--today`, defaulting to the current UTC date
pub(crate) fn reference_date(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid --today date '{}', expected YYYY-MM-DD", raw)),
        None => Ok(Utc::now().date_naive()),
    }
}
