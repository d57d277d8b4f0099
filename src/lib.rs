pub mod app_error;
pub mod args;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;
