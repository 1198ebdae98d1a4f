use serde::Deserialize;

/// Main configuration structure for pagewatch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// URLs to monitor, in processing order
    pub urls: Vec<String>,

    pub monitor: MonitorConfig,

    pub output: OutputConfig,

    /// Navigation container locators, checked before the built-in default
    #[serde(default, rename = "nav-locator")]
    pub nav_locators: Vec<NavLocatorEntry>,
}

/// Fetch and retention behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Maximum fetch attempts per URL before giving up
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between fetch attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Ask the fetch service to render page JavaScript
    #[serde(rename = "render-js", default = "default_render_js")]
    pub render_js: bool,

    /// How long the fetch service should wait after rendering (milliseconds)
    #[serde(rename = "render-wait-ms", default = "default_render_wait_ms")]
    pub render_wait_ms: u64,

    /// Snapshots older than this many days are purged after each run
    #[serde(rename = "retention-days", default = "default_retention_days")]
    pub retention_days: i64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite snapshot database
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path the rendered HTML report is written to
    #[serde(rename = "report-path")]
    pub report_path: String,
}

/// One host-pattern -> CSS-selector entry for locating a page's navigation
/// container (e.g. `host-pattern = "*.example.com"`, `selector = "#navigation"`)
#[derive(Debug, Clone, Deserialize)]
pub struct NavLocatorEntry {
    #[serde(rename = "host-pattern")]
    pub host_pattern: String,

    pub selector: String,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    5000
}

fn default_render_js() -> bool {
    true
}

fn default_render_wait_ms() -> u64 {
    10000
}

fn default_retention_days() -> i64 {
    30
}
