use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cerebras::cli::{self, Cli, Commands};
use cerebras::config::{self, ConfigOverrides};
use cerebras::CerebrasClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = ConfigOverrides {
        model: cli.model.clone(),
        ..Default::default()
    };
    let resolved = config::resolve_with_overrides(&overrides);

    let mut stdout = std::io::stdout().lock();

    if let Commands::Models = cli.command {
        cli::list_models(&mut stdout, Some(resolved.model.as_str()))?;
        return Ok(());
    }

    let client = match CerebrasClient::new(resolved) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    cli::dispatch(&cli.command, &client, &mut stdout).await
}

/// Logs go to stderr so stdout carries only model output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cerebras=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
