//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::gofundme::retry::RetryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Campaign page fetched when no URL is configured.
pub const DEFAULT_URL: &str = "https://gofund.me/ff8591f9f";

/// Desktop Chrome on Windows.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/127.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Campaign page URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pause after a successful response, in milliseconds
    #[serde(default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,

    /// User-Agent header sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header sent with the request
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Print every matched amount instead of only the first
    #[serde(default)]
    pub all: bool,

    /// Retry policy for the page request
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_politeness_delay_ms() -> u64 {
    300
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            politeness_delay_ms: default_politeness_delay_ms(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            proxy: None,
            format: OutputFormat::Text,
            all: false,
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("gofund-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = var("GOFUND_URL") {
            self.url = url;
        }

        if let Some(proxy) = var("GOFUND_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Some(timeout) = var("GOFUND_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }
}

/// Output format for the extracted total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.url, "https://gofund.me/ff8591f9f");
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.politeness_delay_ms, 300);
        assert!(config.user_agent.contains("Chrome/127.0.0.0"));
        assert_eq!(config.accept_language, "en-US,en;q=0.9");
        assert!(config.proxy.is_none());
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.all);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_user_agent_is_single_line() {
        assert!(!DEFAULT_USER_AGENT.contains('\n'));
        assert!(DEFAULT_USER_AGENT
            .starts_with("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit"));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("PLAIN".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
url = "https://gofund.me/abc123"
timeout_secs = 5
politeness_delay_ms = 0
format = "json"

[retry]
total = 2
status_forcelist = [503]
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.url, "https://gofund.me/abc123");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.politeness_delay_ms, 0);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.retry.total, 2);
        assert_eq!(config.retry.status_forcelist, vec![503]);
        assert_eq!(config.accept_language, DEFAULT_ACCEPT_LANGUAGE);
    }

    #[test]
    fn test_from_file_empty_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.retry.total, 5);
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/nonexistent/gofund-scraper.toml");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 9").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.timeout_secs, 9);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GOFUND_URL", "https://gofund.me/other"),
            ("GOFUND_PROXY", "socks5://127.0.0.1:9050"),
            ("GOFUND_TIMEOUT", "45"),
        ]
        .into_iter()
        .collect();

        let config = Config::default().with_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.url, "https://gofund.me/other");
        assert_eq!(config.proxy.as_deref(), Some("socks5://127.0.0.1:9050"));
        assert_eq!(config.timeout_secs, 45);
    }

    #[test]
    fn test_env_invalid_timeout_ignored() {
        let config = Config::default()
            .with_vars(|k| (k == "GOFUND_TIMEOUT").then(|| "never".to_string()));
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.url, DEFAULT_URL);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::default();
        config.all = true;
        config.proxy = Some("http://proxy:8080".to_string());

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert!(parsed.all);
        assert_eq!(parsed.proxy, config.proxy);
        assert_eq!(parsed.retry, config.retry);
    }
}
