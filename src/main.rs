use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tokenlists_aggregator::app_error::AppError;
use tokenlists_aggregator::args::Args;
use tokenlists_aggregator::config::constants::REQUEST_TIMEOUT_SECS;
use tokenlists_aggregator::config::AggregatorConfig;
use tokenlists_aggregator::services::registry::ProviderRegistry;
use tokenlists_aggregator::services::runner::{self, RunOptions};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "token list generation failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = AggregatorConfig::load(&args.config)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|err| AppError::Internal(err.to_string()))?;

    let mut registry = ProviderRegistry::from_config(&config, &client)?;
    let only = args.only_lists();
    if !only.is_empty() {
        registry.retain(|name| only.iter().any(|wanted| wanted == name));
    }
    if registry.is_empty() {
        return Err(AppError::NoProviders);
    }

    info!(
        providers = registry.len(),
        lists_dir = %args.lists_dir.display(),
        aggregate = args.build_aggregate(),
        "starting token list generation"
    );

    let options = RunOptions {
        lists_dir: args.lists_dir.clone(),
        concurrency: args.fetch_concurrency,
        build_aggregate: args.build_aggregate(),
    };
    let report = runner::run(&registry, &config, &options, Utc::now()).await;

    if !report.unavailable.is_empty() {
        warn!(providers = ?report.unavailable, "some providers were unavailable, their lists were kept as is");
    }

    if !report.failed.is_empty() {
        return Err(AppError::ListsFailed(report.failed.len()));
    }

    info!(lists = report.built.len(), "token list generation complete");
    Ok(())
}
