use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use habitat_core::platform::{HostOs, PlatformContext};
use ollama_client::{OllamaClient, DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::paths;

/// Optional `.habitat/config.yaml`. Every field has a default, so a
/// missing file configures nothing away.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    /// Overrides package-manager detection for generated commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl CliConfig {
    pub fn load(root: &Path) -> anyhow::Result<CliConfig> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(CliConfig::default());
        }
        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_yaml::from_str(&data)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Platform for this resolution pass. The flag beats the config file,
    /// the config file beats host detection.
    pub fn platform_context(&self, flag: Option<&str>) -> PlatformContext {
        match flag.map(str::to_string).or_else(|| self.package_manager.clone()) {
            Some(package_manager) => PlatformContext::new(HostOs::current(), package_manager),
            None => PlatformContext::detect(),
        }
    }

    /// Backend endpoint: `OLLAMA_HOST` beats the config file, the config
    /// file beats the local default install.
    pub fn backend_client(&self) -> OllamaClient {
        let url = std::env::var("OLLAMA_HOST")
            .ok()
            .or_else(|| self.backend.url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = self
            .backend
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        OllamaClient::new(url, model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig::load(dir.path()).unwrap();
        assert!(config.backend.url.is_none());
        assert!(config.package_manager.is_none());
    }

    #[test]
    fn config_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = paths::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "backend:\n  url: http://10.0.0.5:11434\n  model: llama3\npackage_manager: pacman\n",
        )
        .unwrap();
        let config = CliConfig::load(dir.path()).unwrap();
        assert_eq!(config.backend.url.as_deref(), Some("http://10.0.0.5:11434"));
        assert_eq!(config.backend.model.as_deref(), Some("llama3"));
        assert_eq!(config.package_manager.as_deref(), Some("pacman"));
    }

    #[test]
    fn flag_beats_config_for_package_manager() {
        let config = CliConfig {
            package_manager: Some("dnf".into()),
            ..CliConfig::default()
        };
        let ctx = config.platform_context(Some("brew"));
        assert_eq!(ctx.package_manager, "brew");
        let ctx = config.platform_context(None);
        assert_eq!(ctx.package_manager, "dnf");
    }
}
