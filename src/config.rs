use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::CustomerRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    /// Extra customer records merged over the built-in table
    pub customers: Vec<CustomerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub max_tokens: u32,
    pub base_url: String,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 1024,
            base_url: "https://api.anthropic.com".to_string(),
            timeout_ms: 60000,
            max_attempts: 1,
            initial_backoff_ms: 200,
            max_backoff_ms: 5000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            customers: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Default log filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.llm.max_attempts, 1);
        assert!(config.customers.is_empty());
    }

    #[test]
    fn test_load_explicit_file_with_partial_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("toolchat.yml");
        fs::write(
            &path,
            r#"
server:
  bind: "0.0.0.0:8080"
llm:
  model: claude-3-haiku-20240307
  max_attempts: 3
customers:
  - customerId: CUST002
    name: Asha Rao
    monthlyIncome: 52000
    creditScore: 690
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.llm.model, "claude-3-haiku-20240307");
        assert_eq!(config.llm.max_attempts, 3);
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.customers.len(), 1);
        assert_eq!(config.customers[0].customer_id, "CUST002");
    }

    #[test]
    fn test_log_filter_follows_configured_level() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("toolchat.yml");
        fs::write(&path, "log_level: debug\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(Config::default().log_filter(), "info");

        let config = Config {
            log_level: None,
            ..Default::default()
        };
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "llm: [not, a, map]").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
