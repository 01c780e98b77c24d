//! CLI entry point - the composition root.
//!
//! Command dispatch routes to handlers; `serve` delegates to the web
//! adapter's bootstrap. Settings come from the config file (if present),
//! with upstream credentials overlaid from the environment.

use clap::Parser;

use pingmap_cli::{Cli, Commands, handlers};
use pingmap_core::settings::Settings;

/// Environment variable carrying the upstream API token.
const ENV_TOKEN: &str = "PINGMAP_TOKEN";

/// Environment variable carrying the upstream API login.
const ENV_LOGIN: &str = "PINGMAP_LOGIN";

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load_or_default(&cli.config).await?;
    settings.apply_env_credentials(
        std::env::var(ENV_TOKEN).ok(),
        std::env::var(ENV_LOGIN).ok(),
    );

    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        static_dir: None,
    }) {
        Commands::Serve { port, static_dir } => {
            handlers::serve::execute(&settings, port, static_dir).await
        }
        Commands::Probe { json } => handlers::probe::execute(&settings, json).await,
        Commands::Check => handlers::check::execute(&settings).await,
    }
}
