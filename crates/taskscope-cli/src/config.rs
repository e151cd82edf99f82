use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:65432";
pub const ENDPOINT_ENV: &str = "TASKSCOPE_ENDPOINT";

/// Zone used for timestamps in text output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeZoneSetting {
    #[default]
    Local,
    Utc,
}

/// Client configuration, optionally read from a YAML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the control plane
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,

    pub time_zone: TimeZoneSetting,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            headers: BTreeMap::new(),
            time_zone: TimeZoneSetting::Local,
        }
    }
}

impl ClientConfig {
    /// Defaults when `path` is `None`, otherwise the file's values over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// `--endpoint` wins over `TASKSCOPE_ENDPOINT`, which wins over the file.
    pub fn resolve_endpoint(&mut self, flag: Option<String>) {
        if let Some(endpoint) = flag.or_else(|| std::env::var(ENDPOINT_ENV).ok()) {
            self.endpoint = endpoint;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let config = ClientConfig::load(None).expect("defaults");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.time_zone, TimeZoneSetting::Local);
    }

    #[test]
    fn test_load_partial_yaml_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "endpoint: https://workflow.example.com\ntime_zone: utc\nheaders:\n  Authorization: Bearer abc"
        )
        .expect("write config");

        let config = ClientConfig::load(Some(file.path())).expect("load config");
        assert_eq!(config.endpoint, "https://workflow.example.com");
        assert_eq!(config.time_zone, TimeZoneSetting::Utc);
        assert_eq!(
            config.headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_reports_missing_and_invalid_files() {
        let err = ClientConfig::load(Some(Path::new("/tmp/does-not-exist-taskscope.yaml")))
            .expect_err("missing file");
        assert!(err.to_string().contains("Failed to read config file"));

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "timeout_secs: soon").expect("write config");
        let err = ClientConfig::load(Some(file.path())).expect_err("invalid yaml");
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_resolve_endpoint_precedence() {
        let _guard = env_lock().lock().expect("env lock");
        let prev = std::env::var(ENDPOINT_ENV).ok();

        unsafe {
            std::env::set_var(ENDPOINT_ENV, "http://env-endpoint");
        }
        let mut config = ClientConfig::default();
        config.resolve_endpoint(Some("http://flag-endpoint".to_string()));
        assert_eq!(config.endpoint, "http://flag-endpoint");

        let mut config = ClientConfig::default();
        config.resolve_endpoint(None);
        assert_eq!(config.endpoint, "http://env-endpoint");

        unsafe {
            std::env::remove_var(ENDPOINT_ENV);
        }
        let mut config = ClientConfig {
            endpoint: "http://file-endpoint".to_string(),
            ..ClientConfig::default()
        };
        config.resolve_endpoint(None);
        assert_eq!(config.endpoint, "http://file-endpoint");

        if let Some(v) = prev {
            unsafe {
                std::env::set_var(ENDPOINT_ENV, v);
            }
        }
    }
}
