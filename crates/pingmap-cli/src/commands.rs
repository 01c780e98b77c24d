//! Subcommand definitions.

use std::path::PathBuf;

use clap::Subcommand;

/// Available subcommands. With none given, `serve` runs with its defaults.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override the listen port from the settings file
        #[arg(long)]
        port: Option<u16>,

        /// Serve static map assets from this directory
        #[arg(long = "static-dir")]
        static_dir: Option<PathBuf>,
    },

    /// Run one probing pass and print the results
    Probe {
        /// Print the JSON feed instead of the human-readable listing
        #[arg(long)]
        json: bool,
    },

    /// Validate the topology document and exit
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_from(["pingmap", "serve", "--port", "8080", "--static-dir", "public"]);
        match cli.command {
            Some(Commands::Serve { port, static_dir }) => {
                assert_eq!(port, Some(8080));
                assert_eq!(static_dir, Some(PathBuf::from("public")));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_probe_json_flag() {
        let cli = Cli::parse_from(["pingmap", "probe", "--json"]);
        assert!(matches!(cli.command, Some(Commands::Probe { json: true })));
    }
}
