//! Link tool configuration.
//!
//! Values come from the environment first; a YAML file, when given,
//! overrides whatever it sets.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Media root used when nothing is configured.
pub const DEFAULT_MEDIA_URL: &str = "/media";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkToolConfig {
    /// File of extra proj4 definitions; the bundled table is used when unset
    pub crs_overrides_path: Option<PathBuf>,

    /// Public URL style documents are served under
    pub media_url: String,

    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for LinkToolConfig {
    fn default() -> Self {
        Self {
            crs_overrides_path: None,
            media_url: DEFAULT_MEDIA_URL.to_string(),
            json_logs: false,
        }
    }
}

/// Subset of [`LinkToolConfig`] a YAML file may set.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    crs_overrides_path: Option<PathBuf>,
    media_url: Option<String>,
    json_logs: Option<bool>,
}

impl LinkToolConfig {
    /// Load from the environment, then apply `path` if given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::from_env();
        if let Some(path) = path {
            config.apply_yaml_file(path)?;
        }
        Ok(config)
    }

    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            crs_overrides_path: var("CRS_OVERRIDES_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            media_url: var("MEDIA_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.media_url),
            json_logs: var("JSON_LOGS")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Override fields with those set in a YAML file.
    pub fn apply_yaml_file(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        self.apply_yaml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "Applied config file");
        Ok(())
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        if contents.trim().is_empty() {
            return Ok(());
        }
        let yaml: YamlConfig = serde_yaml::from_str(contents)?;

        if let Some(path) = yaml.crs_overrides_path {
            self.crs_overrides_path = Some(path);
        }
        if let Some(url) = yaml.media_url {
            self.media_url = url;
        }
        if let Some(json_logs) = yaml.json_logs {
            self.json_logs = json_logs;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(LinkToolConfig::from_vars(vars(&[])), LinkToolConfig::default());
    }

    #[test]
    fn test_from_vars() {
        let config = LinkToolConfig::from_vars(vars(&[
            ("CRS_OVERRIDES_PATH", "/etc/catalogue/epsg.txt"),
            ("MEDIA_URL", "https://csw.example/media"),
            ("JSON_LOGS", "TRUE"),
        ]));
        assert_eq!(
            config.crs_overrides_path.as_deref(),
            Some(Path::new("/etc/catalogue/epsg.txt"))
        );
        assert_eq!(config.media_url, "https://csw.example/media");
        assert!(config.json_logs);
    }

    #[test]
    fn test_yaml_overrides_only_what_it_sets() {
        let mut config = LinkToolConfig::from_vars(vars(&[("MEDIA_URL", "https://a.example/m")]));
        config.apply_yaml("json_logs: true\n").unwrap();
        assert_eq!(config.media_url, "https://a.example/m");
        assert!(config.json_logs);

        config.apply_yaml("").unwrap();
        assert!(config.json_logs);
    }

    #[test]
    fn test_yaml_rejects_unknown_keys() {
        let mut config = LinkToolConfig::default();
        assert!(config.apply_yaml("redis_url: redis://x\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "media_url: https://csw.example/media").unwrap();
        writeln!(file, "crs_overrides_path: /srv/epsg.txt").unwrap();

        let config = LinkToolConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.media_url, "https://csw.example/media");
        assert_eq!(
            config.crs_overrides_path.as_deref(),
            Some(Path::new("/srv/epsg.txt"))
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = LinkToolConfig::load(Some(Path::new("/nonexistent/link-tool.yaml")))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/link-tool.yaml"));
    }
}
