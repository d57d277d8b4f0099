/// Maximum number of providers fetched concurrently
pub const TOKEN_FETCH_CONCURRENCY: usize = 10;

/// A token must be seen by at least `ceil(contributors / QUORUM_DIVISOR)` providers of its chain
pub const QUORUM_DIVISOR: usize = 2;

/// Page size requested from paginated provider APIs
pub const DEFAULT_PAGE_SIZE: usize = 250;

/// File name of the static aggregator configuration when none is given
pub const DEFAULT_CONFIG_PATH: &str = "configs/aggregator.json";

/// Directory holding one persisted snapshot per list
pub const DEFAULT_LISTS_DIR: &str = "lists";

/// Upper bound on pages requested from one paginated provider in a run
pub const MAX_PAGES: usize = 400;

/// Timeout of a single provider HTTP request (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
