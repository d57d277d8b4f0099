pub mod aggregator;
pub mod assembler;
pub mod errors;
pub mod normalizer;
pub mod reconciler;
pub mod registry;
pub mod runner;
pub mod token_sources;
