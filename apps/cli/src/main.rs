mod commands;
mod core;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::doctor::DoctorCommand;
use commands::setup::SetupCommand;

#[derive(Parser)]
#[command(name = "devstrap")]
#[command(about = "Bootstrap your developer environment with Homebrew", long_about = None)]
#[command(version)]
struct Cli {
    /// Append the run log here instead of ~/.devstrap/devstrap.log
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick packages, install them and configure the shell
    Setup(SetupCommand),
    /// Check that installed tools respond
    Doctor(DoctorCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = match crate::core::logging::init(cli.log_file.as_deref()) {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!(
                "{} run log unavailable: {:#}",
                console::style("warning:").yellow().bold(),
                e
            );
            None
        }
    };

    let result = match cli.command {
        Commands::Setup(cmd) => cmd.execute().await,
        Commands::Doctor(cmd) => cmd.execute().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %e, "run aborted");
            e.render(log_file.as_deref());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_file_is_global() {
        let cli = Cli::parse_from(["devstrap", "doctor", "--log-file", "/tmp/run.log"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/run.log")));
        assert!(matches!(cli.command, Commands::Doctor(_)));
    }
}
