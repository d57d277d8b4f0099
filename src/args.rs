use std::path::PathBuf;

use clap::Parser;

use crate::config::constants::{DEFAULT_CONFIG_PATH, DEFAULT_LISTS_DIR, TOKEN_FETCH_CONCURRENCY};

#[derive(Parser, Debug, Clone)]
#[command(about = "Builds versioned token lists from many providers and a quorum-filtered aggregate")]
pub struct Args {
    #[arg(long, env = "AGGREGATOR_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[arg(long, env = "LISTS_DIR", default_value = DEFAULT_LISTS_DIR)]
    pub lists_dir: PathBuf,

    #[arg(long, env = "FETCH_CONCURRENCY", default_value_t = TOKEN_FETCH_CONCURRENCY)]
    pub fetch_concurrency: usize,

    /// Build the per-provider lists only
    #[arg(long, env = "SKIP_AGGREGATE", default_value_t = false)]
    pub skip_aggregate: bool,

    /// Comma separated provider names. Restricting providers also skips the aggregate.
    #[arg(long = "only", env = "ONLY_LISTS", default_value = "")]
    only_from_env: String,
}

impl Args {
    pub fn from_env() -> Self {
        Self::parse()
    }

    pub fn only_lists(&self) -> Vec<String> {
        self.only_from_env
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn build_aggregate(&self) -> bool {
        !self.skip_aggregate && self.only_lists().is_empty()
    }
}
