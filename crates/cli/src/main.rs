//! EventSky CLI
//!
//! Find, attend and create virtual events on the blockchain.
//!
//! ```bash
//! eventsky list --search yoga
//! eventsky create --name "Yoga Flow" --link https://meet.example.com/yoga \
//!     --date 2022-09-21 --time 12:16 --cost 15 --capacity 100 --deposit 0.001 \
//!     --image yoga.png
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shared::AppConfig;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "eventsky")]
#[command(version)]
#[command(about = "Find and create virtual events on the blockchain", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = output::OutputFormat::Table)]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events from the index, optionally filtered by name
    List(commands::list::ListArgs),
    /// Upload event details and create the event on chain
    Create(commands::create::CreateArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: config load failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::List(args) => commands::list::handle(args, &cfg, cli.format).await.map(|_| ExitCode::SUCCESS),
        Commands::Create(args) => commands::create::handle(args, &cfg, cli.format).await,
    };

    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e:#}");
        ExitCode::FAILURE
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).json().init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_listing() {
        let cli = Cli::try_parse_from(["eventsky", "list", "--search", "yoga", "-f", "json"]).unwrap();
        assert!(matches!(cli.format, output::OutputFormat::Json));
        match cli.command {
            Commands::List(args) => assert_eq!(args.search.as_deref(), Some("yoga")),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn create_requires_image() {
        let res = Cli::try_parse_from([
            "eventsky", "create", "--name", "Yoga Flow", "--link", "https://x", "--date", "2022-09-21",
            "--time", "12:16", "--cost", "15", "--capacity", "100", "--deposit", "0.001",
        ]);
        assert!(res.is_err());
    }
}
