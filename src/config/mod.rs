//! Configuration loading and validation
//!
//! Pagewatch is configured through a TOML file listing the URLs to monitor
//! plus fetch, retention, output, and navigation-locator settings.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, MonitorConfig, NavLocatorEntry, OutputConfig};
pub use validation::validate;
