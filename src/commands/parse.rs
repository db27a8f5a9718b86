use crate::assembler::{AssemblerOptions, QuestionnaireAssembler};
use crate::core::Error;
use crate::io::{self, output::OutputFormat};
use crate::observability;
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{reference_date, resolve_config};

pub struct ParseConfig {
    pub path: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub today: Option<String>,
    pub config: Option<PathBuf>,
    pub verbosity: u8,
}

pub fn parse_records(config: ParseConfig) -> Result<()> {
    observability::init_tracing(config.verbosity);

    let settings = resolve_config(config.config.as_deref())?;
    let options = AssemblerOptions::from_config(&settings, reference_date(config.today.as_deref())?);
    let records = io::load_records(&config.path)?;
    info!(
        "Assembling {} record(s) from {}",
        records.len(),
        config.path.display()
    );

    let results = QuestionnaireAssembler::new(options).assemble_batch(&records);

    let format = config
        .format
        .or(settings.output.default_format)
        .unwrap_or(OutputFormat::Terminal);
    let sink: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(create_output_file(path)?)),
        None => Box::new(std::io::stdout()),
    };
    io::create_writer(format, sink).write_results(&results)?;
    Ok(())
}

fn create_output_file(path: &Path) -> crate::core::Result<File> {
    File::create(path).map_err(|e| Error::file_system("Failed to create output file", path, e))
}
