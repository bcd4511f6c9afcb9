//! Runtime settings.
//!
//! Layered configuration: built-in defaults, then an optional TOML file,
//! then `PROBEWATCH_*` environment variables. CLI flags are applied on top
//! by the binary.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::app::PollSettings;

/// Resolved dashboard settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Controller base URL.
    pub controller_url: String,
    /// Node-discovery poll interval, seconds.
    pub discovery_interval_secs: u64,
    /// Selected-node poll interval, seconds.
    pub detail_interval_secs: u64,
    /// Per-request HTTP timeout, seconds.
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Load settings, optionally from a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("controller_url", "http://127.0.0.1:8080")?
            .set_default("discovery_interval_secs", 5_i64)?
            .set_default("detail_interval_secs", 3_i64)?
            .set_default("request_timeout_secs", 10_i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("PROBEWATCH"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Poll intervals for the two loops.
    pub fn poll(&self) -> PollSettings {
        PollSettings {
            discovery: Duration::from_secs(self.discovery_interval_secs),
            detail: Duration::from_secs(self.detail_interval_secs),
        }
    }

    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.controller_url, "http://127.0.0.1:8080");
        assert_eq!(settings.poll().discovery, Duration::from_secs(5));
        assert_eq!(settings.poll().detail, Duration::from_secs(3));
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "controller_url = \"http://10.0.0.2:9000\"\ndetail_interval_secs = 1"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.controller_url, "http://10.0.0.2:9000");
        assert_eq!(settings.poll().detail, Duration::from_secs(1));
        // Untouched keys keep their defaults
        assert_eq!(settings.poll().discovery, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/probewatch.toml"))).is_err());
    }
}
