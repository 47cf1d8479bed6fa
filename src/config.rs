//! Configuration
//!
//! Settings live in a JSON file (created with defaults on first run) and can
//! be overridden from the environment or a `.env` file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing_subscriber::EnvFilter;

use crate::analysis::{WorksheetAnalyzer, DEFAULT_MODEL, DEFAULT_PROMPT};

pub const MODEL_VAR: &str = "WORKSHEET_MODEL";
pub const PROMPT_VAR: &str = "WORKSHEET_PROMPT";
pub const LOG_VAR: &str = "WORKSHEET_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Model the extractor should ask
    pub model: String,
    /// Instruction sent with the worksheet photo
    pub prompt: String,
    /// `tracing` filter directive, e.g. "info" or "worksheet_hints=debug"
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Apply overrides from a variable lookup. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str, target: &mut String| {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *target = value;
            }
        };
        set(MODEL_VAR, &mut self.model);
        set(PROMPT_VAR, &mut self.prompt);
        set(LOG_VAR, &mut self.log_filter);
    }

    /// Overrides from the process environment, after loading `.env`
    pub fn apply_env(&mut self) {
        dotenv::dotenv().ok();
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Like [`apply_env`](Self::apply_env) with an explicit `.env` file.
    /// Variables already set in the process win over the file.
    pub fn apply_env_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        dotenv::from_path(path).with_context(|| format!("Failed to load {}", path.display()))?;
        self.apply_overrides(|key| std::env::var(key).ok());
        Ok(())
    }

    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_filter).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    pub fn configure(&self, analyzer: WorksheetAnalyzer) -> WorksheetAnalyzer {
        analyzer.with_model(&self.model).with_prompt(&self.prompt)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            let default = AppConfig::default();
            self.save(&default).await?;
            return Ok(default);
        }
        let content = fs::read_to_string(&self.path)
            .await
            .context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub async fn save(&self, config: &AppConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .await
            .context("Failed to write config file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("worksheet.json");
        let manager = ConfigManager::new(path.clone());

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded, AppConfig::default());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("worksheet.json"));

        let config = AppConfig {
            model: "gemini-2.0-flash".to_string(),
            ..AppConfig::default()
        };
        manager.save(&config).await.unwrap();
        assert_eq!(manager.load().await.unwrap(), config);
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("worksheet.json");
        std::fs::write(&path, r#"{ "log_filter": "debug" }"#).unwrap();

        let loaded = ConfigManager::new(path).load().await.unwrap();
        assert_eq!(loaded.log_filter, "debug");
        assert_eq!(loaded.model, DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("worksheet.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(ConfigManager::new(path).load().await.is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(MODEL_VAR, "local-vlm"), (LOG_VAR, "  ")]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.model, "local-vlm");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_bad_log_filter_falls_back_to_info() {
        let config = AppConfig {
            log_filter: "worksheet_hints=loud".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.env_filter().to_string(), "info");

        let config = AppConfig {
            log_filter: "worksheet_hints=debug".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.env_filter().to_string(), "worksheet_hints=debug");
    }

    #[test]
    fn test_env_file_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, format!("{PROMPT_VAR}=読んでください\n")).unwrap();

        let mut config = AppConfig::default();
        config.apply_env_file(&path).unwrap();
        assert_eq!(config.prompt, "読んでください");

        assert!(config.apply_env_file(dir.path().join("missing.env")).is_err());
    }
}
