pub mod aggregator_config;
pub mod constants;
pub mod errors;
pub mod native_tokens;

pub use aggregator_config::*;
