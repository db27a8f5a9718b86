use crate::assembler::{AssemblerOptions, QuestionnaireAssembler};
use crate::core::StrictQuestionnaireResult;
use crate::display::format_stage;
use crate::io;
use crate::observability;
use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use super::{reference_date, resolve_config};

pub struct CheckConfig {
    pub path: PathBuf,
    pub strict: bool,
    pub config: Option<PathBuf>,
    pub verbosity: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub total: usize,
    pub undetected: usize,
    pub contaminated: usize,
    pub with_warnings: usize,
}

impl CheckSummary {
    pub fn from_results(results: &[StrictQuestionnaireResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.total += 1;
            if result.detected_stage.is_none() {
                summary.undetected += 1;
            }
            if !result.stage_validation.is_valid {
                summary.contaminated += 1;
            }
            if !result.warnings().is_empty() {
                summary.with_warnings += 1;
            }
            summary
        })
    }

    pub fn is_clean(&self) -> bool {
        self.undetected == 0 && self.contaminated == 0
    }
}

pub fn check_records(config: CheckConfig) -> Result<()> {
    observability::init_tracing(config.verbosity);

    let settings = resolve_config(config.config.as_deref())?;
    let options = AssemblerOptions::from_config(&settings, reference_date(None)?);
    let records = io::load_records(&config.path)?;
    let results = QuestionnaireAssembler::new(options).assemble_batch(&records);

    for (index, result) in results.iter().enumerate() {
        print_result_line(index, result);
    }

    let summary = CheckSummary::from_results(&results);
    println!(
        "\n{} record(s): {} undetected, {} contaminated, {} with warnings",
        summary.total, summary.undetected, summary.contaminated, summary.with_warnings
    );

    if config.strict && !summary.is_clean() {
        anyhow::bail!(
            "Check failed: {} undetected and {} contaminated record(s)",
            summary.undetected,
            summary.contaminated
        );
    }
    Ok(())
}

fn print_result_line(index: usize, result: &StrictQuestionnaireResult) {
    let id = result
        .record_id
        .clone()
        .unwrap_or_else(|| format!("#{}", index));
    let status = if result.detected_stage.is_none() {
        "UNDETECTED".red()
    } else if !result.stage_validation.is_valid {
        "CONTAMINATED".yellow()
    } else {
        "OK".green()
    };
    println!("{} {} {}", status, id, format_stage(result));
    for violation in &result.stage_validation.violations {
        println!("    {}", violation.message);
    }
    for warning in result.warnings() {
        println!("    {:?}: {}", warning.kind, warning.message);
    }
}
