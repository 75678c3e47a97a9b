//! `prepdeck` - Static GMAT lesson pages with KaTeX math

use clap::Parser;

use prepdeck::cli::args::Cli;
use prepdeck::cli::commands;
use prepdeck::error::ExitCode;
use prepdeck::observability::LogSettings;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(ExitCode::USAGE_ERROR);
        }
    };

    if !cli.quiet {
        LogSettings::from_cli(&cli).init();
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
