use anyhow::Result;
use answermap::cli::{Cli, Commands};
use answermap::commands::{self, CheckConfig, ParseConfig};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            path,
            format,
            output,
            today,
            config,
            verbosity,
        } => commands::parse_records(ParseConfig {
            path,
            format,
            output,
            today,
            config,
            verbosity,
        }),
        Commands::Check {
            path,
            strict,
            config,
            verbosity,
        } => commands::check_records(CheckConfig {
            path,
            strict,
            config,
            verbosity,
        }),
        Commands::Registry { stage } => {
            commands::print_registry(stage.map(Into::into));
            Ok(())
        }
        Commands::Init { force } => commands::init_config(force),
    }
}
