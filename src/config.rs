//! Layered configuration for the employer console
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. TOML file (explicit path, or `config.toml` in the platform config dir)
//! 3. Environment variables prefixed `EMPLOYER_CONSOLE_`
//! 4. Command-line overrides applied by the binary

use crate::error::{ConsoleError, Result};
use crate::session::SessionUser;
use directories::ProjectDirs;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment prefix for every setting
pub const ENV_PREFIX: &str = "EMPLOYER_CONSOLE";

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Console settings after all sources are merged
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the platform API (without the `/agents` suffix)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token issued by the platform login flow
    #[serde(default, deserialize_with = "deserialize_token")]
    pub token: Option<SecretString>,

    /// Input poll interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// TCP connect timeout for API requests
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Where tracing output goes (the terminal belongs to the UI)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Signed-in user shown in the sidebar header
    #[serde(default)]
    pub user: SessionUser,
}

fn deserialize_token<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|t| !t.is_empty()).map(SecretString::from))
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_tick_rate_ms() -> u64 {
    100
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            tick_rate_ms: default_tick_rate_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_file: None,
            user: SessionUser::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from the default file location (if present) and environment
    pub fn load() -> Result<Self> {
        Self::build(default_config_file().as_deref(), false)
    }

    /// Load configuration from an explicit file and environment
    ///
    /// `None` skips the file layer entirely. A path passed here must exist.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        Self::build(file, true)
    }

    fn build(file: Option<&Path>, required: bool) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            debug!("Reading config file {}", path.display());
            builder = builder.add_source(config::File::from(path).required(required));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ConsoleConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the console cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConsoleError::Config(config::ConfigError::Message(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            ))));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConsoleError::Config(config::ConfigError::Message(
                "tick_rate_ms must be greater than zero".to_string(),
            )));
        }
        Ok(())
    }

    /// Bearer token, or a configuration error explaining how to supply one
    pub fn require_token(&self) -> Result<SecretString> {
        self.token.clone().ok_or_else(|| {
            ConsoleError::Config(config::ConfigError::Message(format!(
                "No session token. Set {}_TOKEN or pass --token",
                ENV_PREFIX
            )))
        })
    }

    /// Log file path, falling back to the platform data directory
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_local_dir().join("employer-console.log"))
                .unwrap_or_else(|| std::env::temp_dir().join("employer-console.log"))
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "employer-console", "employer-console")
}

/// `config.toml` under the platform config directory
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    fn clear_env() {
        for key in [
            "EMPLOYER_CONSOLE_API_URL",
            "EMPLOYER_CONSOLE_TOKEN",
            "EMPLOYER_CONSOLE_TICK_RATE_MS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        clear_env();
        let config = ConsoleConfig::load_from(None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.tick_rate_ms, 100);
        assert!(config.token.is_none());
        assert!(config.require_token().is_err());
    }

    #[test]
    #[serial]
    fn test_file_then_env_precedence() {
        clear_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
api_url = "https://file.example/api"
token = "file-token"
tick_rate_ms = 250

[user]
name = "Dana"
company_name = "Acme Corp"
"#
        )
        .unwrap();

        env::set_var("EMPLOYER_CONSOLE_API_URL", "https://env.example/api");
        let config = ConsoleConfig::load_from(Some(file.path())).unwrap();
        clear_env();

        assert_eq!(config.api_url, "https://env.example/api");
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.require_token().unwrap().expose_secret(), "file-token");
        assert_eq!(config.user.company_label(), "Acme Corp");
    }

    #[test]
    #[serial]
    fn test_rejects_non_http_url() {
        clear_env();
        env::set_var("EMPLOYER_CONSOLE_API_URL", "ftp://nope");
        let result = ConsoleConfig::load_from(None);
        clear_env();
        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_an_error() {
        clear_env();
        let result = ConsoleConfig::load_from(Some(Path::new("/nonexistent/console.toml")));
        assert!(result.is_err());
    }
}
