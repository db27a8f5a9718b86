use crate::core::Stage;
use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    /// Idea stage questionnaire
    Idea,
    /// Early revenue stage questionnaire
    EarlyRevenue,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Idea => Stage::IdeaStage,
            StageArg::EarlyRevenue => Stage::EarlyRevenueStage,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "answermap")]
#[command(about = "Stage-aware questionnaire normalizer for fellowship applications", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize one record or an array of records into stage-pure questionnaires
    Parse {
        /// JSON file holding a record object or an array of records
        path: PathBuf,

        /// Output format (falls back to the config file, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reference date for age checks (YYYY-MM-DD, defaults to today)
        #[arg(long, env = "ANSWERMAP_TODAY")]
        today: Option<String>,

        /// Configuration file (defaults to .answermap.toml search)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Report stage detection and contamination findings
    Check {
        /// JSON file holding a record object or an array of records
        path: PathBuf,

        /// Exit with an error if any record is undetected or contaminated
        #[arg(long)]
        strict: bool,

        /// Configuration file (defaults to .answermap.toml search)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Print the question registry and accepted aliases
    Registry {
        /// Only show one stage
        #[arg(long, value_enum)]
        stage: Option<StageArg>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
