use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::config::constants::TOKEN_FETCH_CONCURRENCY;
use crate::config::AggregatorConfig;
use crate::domain::{AggregatedToken, ListExtensions, Version};
use crate::infra::errors::StorageError;
use crate::infra::storage::{list_path, load_snapshot, save_snapshot};
use crate::services::aggregator::{aggregate, dedupe, ProviderList};
use crate::services::assembler::{assemble, ListDescriptor};
use crate::services::errors::ServiceError;
use crate::services::normalizer::normalize_all;
use crate::services::reconciler::{reconcile, TokenFilter};
use crate::services::registry::ProviderRegistry;
use crate::services::token_sources::fetch_all;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub lists_dir: PathBuf,
    pub concurrency: usize,
    pub build_aggregate: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            lists_dir: PathBuf::from(crate::config::constants::DEFAULT_LISTS_DIR),
            concurrency: TOKEN_FETCH_CONCURRENCY,
            build_aggregate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOutcome {
    pub name: String,
    pub version: Version,
    pub tokens: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub rejected: usize,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub built: Vec<ListOutcome>,
    /// Providers whose fetch failed; their persisted lists were left untouched.
    pub unavailable: Vec<String>,
    pub failed: Vec<ServiceError>,
}

impl RunReport {
    pub fn outcome(&self, name: &str) -> Option<&ListOutcome> {
        self.built.iter().find(|outcome| outcome.name == name)
    }
}

/// Reconciles `candidates` against the persisted list `name` and writes the next snapshot.
pub fn build_list(
    lists_dir: &Path,
    name: &str,
    descriptor: &ListDescriptor,
    candidates: Vec<AggregatedToken>,
    filter: &TokenFilter,
    metadata: Option<ListExtensions>,
    now: DateTime<Utc>,
) -> Result<ListOutcome, ServiceError> {
    let path = list_path(lists_dir, name);
    let failed = |err: StorageError| ServiceError::ListNotUpdated(name.to_string(), err);

    let previous = load_snapshot(&path).map_err(failed)?;
    let reconciliation = reconcile(&previous, candidates, filter, now);

    let outcome = ListOutcome {
        name: name.to_string(),
        version: reconciliation.version,
        tokens: reconciliation.tokens.len(),
        added: reconciliation.delta.added.len(),
        removed: reconciliation.delta.removed.len(),
        modified: reconciliation.delta.modified.len(),
        rejected: reconciliation.rejected,
    };

    let next = assemble(descriptor, &previous, reconciliation, metadata);
    save_snapshot(&path, &next).map_err(failed)?;

    Ok(outcome)
}

/// Fetches every provider, rebuilds each provider's own list, then the aggregated list.
pub async fn run(
    registry: &ProviderRegistry,
    config: &AggregatorConfig,
    options: &RunOptions,
    now: DateTime<Utc>,
) -> RunReport {
    let filter = TokenFilter::from_config(config);
    let mut report = RunReport::default();
    let mut provider_lists: Vec<ProviderList> = Vec::with_capacity(registry.len());

    for (entry, fetched) in fetch_all(registry, options.concurrency).await {
        let name = entry.info.name.as_str();

        let raws = match fetched {
            Ok(raws) => raws,
            Err(_) => {
                report.unavailable.push(name.to_string());
                continue;
            }
        };

        let (tokens, skipped) = normalize_all(raws, config);
        if skipped > 0 {
            warn!(provider = name, skipped, "dropped records with malformed addresses");
        }

        record(
            &mut report,
            build_list(&options.lists_dir, name, &entry.descriptor, dedupe(&tokens), &filter, None, now),
        );

        provider_lists.push(ProviderList {
            info: entry.info.clone(),
            tokens,
        });
    }

    if options.build_aggregate {
        let aggregation = aggregate(&provider_lists, config);
        info!(
            below_quorum = aggregation.below_quorum,
            candidates = aggregation.tokens.len(),
            "aggregated provider lists"
        );

        let metadata = ListExtensions {
            contributors: aggregation.contributors,
            ..ListExtensions::default()
        };

        record(
            &mut report,
            build_list(
                &options.lists_dir,
                &config.aggregate.name,
                &ListDescriptor::from(&config.aggregate),
                aggregation.tokens,
                &filter,
                Some(metadata),
                now,
            ),
        );
    }

    report
}

fn record(report: &mut RunReport, result: Result<ListOutcome, ServiceError>) {
    match result {
        Ok(outcome) => {
            info!(
                list = %outcome.name,
                version = %outcome.version,
                tokens = outcome.tokens,
                added = outcome.added,
                removed = outcome.removed,
                modified = outcome.modified,
                rejected = outcome.rejected,
                "list written"
            );
            report.built.push(outcome);
        }
        Err(err) => {
            error!(error = %err, "list build failed");
            report.failed.push(err);
        }
    }
}
