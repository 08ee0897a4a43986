//! Application configuration
//!
//! Settings are read from an optional YAML file; every section and field
//! has a default, so an empty file (or no file) is a valid configuration.
//! Command-line flags are applied on top by the CLI runner.

use crate::decode::{DecoderConfig, JsonDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::pagination::PageSize;
use crate::source::{DataSource, FileSource, HttpSource};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Public document the records are fetched from by default
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/saaslabsco/frontend-assignment/master/frontend-assignment.json";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Where records come from
    pub source: SourceConfig,
    /// Table settings
    pub view: ViewConfig,
    /// HTTP server settings (`serve` command)
    pub server: ServerConfig,
}

impl AppConfig {
    /// Check values that serde alone cannot
    pub fn validate(&self) -> Result<()> {
        if self.source.file.is_none() {
            if self.source.url.trim().is_empty() {
                return Err(Error::missing_field("source.url"));
            }
            url::Url::parse(&self.source.url)?;
        }
        if self.source.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "source.timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.source.max_backoff_ms < self.source.initial_backoff_ms {
            return Err(Error::invalid_value(
                "source.max_backoff_ms",
                "must not be less than `source.initial_backoff_ms`",
            ));
        }
        if self.server.max_sessions == 0 {
            return Err(Error::invalid_value(
                "server.max_sessions",
                "must be greater than zero",
            ));
        }
        if self.server.session_idle_secs == 0 {
            return Err(Error::invalid_value(
                "server.session_idle_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Build the data source described by this configuration
    ///
    /// A configured file takes precedence over the URL.
    pub fn build_source(&self) -> Result<Arc<dyn DataSource>> {
        let decoder = Arc::new(JsonDecoder::from_config(&self.source.decoder_config()));

        if let Some(path) = &self.source.file {
            return Ok(Arc::new(FileSource::with_decoder(path, decoder)));
        }

        let client = HttpClient::with_config(self.source.http_config())?;
        Ok(Arc::new(HttpSource::with_decoder(
            client,
            self.source.url.clone(),
            decoder,
        )))
    }
}

// ============================================================================
// Source Config
// ============================================================================

/// Record source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// URL of the JSON document
    pub url: String,
    /// Local JSON file to read instead of the URL
    pub file: Option<PathBuf>,
    /// Dot path to the record array inside the document
    pub record_path: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after a failed request (0 = none)
    pub max_retries: u32,
    /// Backoff between retries
    pub backoff: BackoffType,
    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Upper bound on any retry delay, including `Retry-After` waits
    pub max_backoff_ms: u64,
    /// Outbound rate limit (omit to disable)
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            file: None,
            record_path: None,
            timeout_secs: 30,
            max_retries: 0,
            backoff: BackoffType::default(),
            initial_backoff_ms: 100,
            max_backoff_ms: 10_000,
            rate_limit: Some(RateLimiterConfig::default()),
            user_agent: None,
        }
    }
}

impl SourceConfig {
    /// HTTP client settings for this source
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Decoder settings for this source
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            record_path: self.record_path.clone(),
        }
    }
}

// ============================================================================
// View Config
// ============================================================================

/// Table settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Records per page, fixed for the lifetime of a session
    pub page_size: PageSize,
}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Live sessions kept before the least recently used is evicted
    pub max_sessions: usize,
    /// Seconds a session may sit unused before it expires
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_sessions: 1000,
            session_idle_secs: 1800,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_config_from_str(&content)
}

/// Parse and validate a YAML configuration
pub fn load_config_from_str(yaml: &str) -> Result<AppConfig> {
    let config: AppConfig = if yaml.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.source.max_retries, 0);
        assert_eq!(config.view.page_size.get(), 5);
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(load_config_from_str("").unwrap(), AppConfig::default());
        assert_eq!(load_config_from_str("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let config = load_config_from_str(
            r"
source:
  url: https://example.com/projects.json
  record_path: $.data
  max_retries: 2
  backoff: linear
  rate_limit:
    requests_per_second: 2
view:
  page_size: 10
",
        )
        .unwrap();

        assert_eq!(config.source.url, "https://example.com/projects.json");
        assert_eq!(config.source.record_path.as_deref(), Some("$.data"));
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.view.page_size.get(), 10);
        assert_eq!(config.server, ServerConfig::default());

        let http = config.source.http_config();
        assert_eq!(http.max_retries, 2);
        assert_eq!(http.backoff_type, BackoffType::Linear);
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::new(2, 5)));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = load_config_from_str("view:\n  page_size: 0\n").unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(load_config_from_str("view:\n  per_page: 3\n").is_err());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = load_config_from_str("source:\n  url: not a url\n").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = load_config_from_str("source:\n  url: ''\n").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_file_source_skips_url_check() {
        let config = load_config_from_str("source:\n  url: ''\n  file: ./projects.json\n").unwrap();
        assert_eq!(config.source.file, Some(PathBuf::from("./projects.json")));
        assert_eq!(config.build_source().unwrap().describe(), "./projects.json");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = load_config_from_str("source:\n  timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_max_backoff_is_configurable() {
        let config = load_config_from_str("source:\n  max_backoff_ms: 2500\n").unwrap();
        assert_eq!(
            config.source.http_config().max_backoff,
            Duration::from_millis(2500)
        );
        assert_eq!(
            AppConfig::default().source.http_config().max_backoff,
            Duration::from_secs(10)
        );

        let err = load_config_from_str("source:\n  initial_backoff_ms: 500\n  max_backoff_ms: 100\n")
            .unwrap_err();
        assert!(err.to_string().contains("source.max_backoff_ms"));
    }

    #[test]
    fn test_session_limits_validated() {
        let config =
            load_config_from_str("server:\n  max_sessions: 10\n  session_idle_secs: 60\n").unwrap();
        assert_eq!(config.server.max_sessions, 10);
        assert_eq!(config.server.session_idle_secs, 60);

        let err = load_config_from_str("server:\n  max_sessions: 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
        let err = load_config_from_str("server:\n  session_idle_secs: 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_rate_limit_can_be_disabled() {
        let config = load_config_from_str("source:\n  rate_limit: null\n").unwrap();
        assert!(config.source.http_config().rate_limit.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9090").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_build_http_source() {
        let source = AppConfig::default().build_source().unwrap();
        assert_eq!(source.describe(), DEFAULT_SOURCE_URL);
    }
}
