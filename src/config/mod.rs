//! Configuration module
//!
//! Application settings and the paths they are read from.

mod app_config;
mod paths;

pub use app_config::{AppConfig, EnrichmentMode, ProxyMode};
pub use paths::Paths;
