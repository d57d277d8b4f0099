pub mod errors;
pub mod storage;
