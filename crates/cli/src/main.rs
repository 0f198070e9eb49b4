mod args;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repo_owners_core::{
    load_config, load_default_config, run_report, validate_config, GitHubClient, RepositoryHost,
};

use args::{default_config_path, Args, TOKEN_ENV};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let token = std::env::var(TOKEN_ENV).unwrap_or_default();
    if token.is_empty() {
        bail!(
            "No token has been supplied. Please set access token to environment variable {}!",
            TOKEN_ENV
        );
    }

    // Load configuration
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            let path = default_config_path();
            load_default_config(path.as_deref()).context("Failed to load default config")?
        }
    };
    args.apply(&mut config);

    validate_config(&config).context("Configuration validation failed")?;

    info!("API URL: {}", config.github.api_url);
    info!("Max concurrent lookups: {}", config.collector.max_concurrent);

    let host: Arc<dyn RepositoryHost> = Arc::new(
        GitHubClient::new(&config.github, &token).context("Failed to create GitHub client")?,
    );

    let options = args.run_options();
    let summary = run_report(&config, host, &options)
        .await
        .with_context(|| format!("Failed to build owner report for {}", options.org))?;

    info!(
        org = %summary.org,
        repositories = summary.repositories,
        rows = summary.rows,
        missing = summary.stats.missing,
        path = %summary.output_path.display(),
        "Done"
    );

    Ok(())
}
