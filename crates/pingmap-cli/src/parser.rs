//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the pingmap service.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "pingmap")]
#[command(about = "Probe game-server tunnels and serve a latency map")]
#[command(version)]
pub struct Cli {
    /// Path to the settings file
    #[arg(long = "config", global = true, default_value = "config.json")]
    pub config: String,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["pingmap", "--verbose", "--config", "/tmp/cfg.json", "check"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, "/tmp/cfg.json");
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["pingmap"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, "config.json");
    }
}
