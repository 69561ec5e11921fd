pub mod access;
pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod locale;
pub mod query;
pub mod seed;
pub mod telemetry;
