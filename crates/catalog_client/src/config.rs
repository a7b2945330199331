use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const CONFIG_FILE: &str = "catalog.toml";

/// Environment variables consulted for the API key, lowest priority first.
const API_KEY_VARS: [&str; 3] = ["EXPO_PUBLIC_MOVIE_API_KEY", "MOVIE_API_KEY", "CATALOG__API_KEY"];

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            language: DEFAULT_LANGUAGE.into(),
        }
    }
}

impl CatalogConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Defaults, then `catalog.toml` in the working directory, then environment.
pub fn load_config() -> CatalogConfig {
    let mut config = CatalogConfig::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        if let Err(err) = apply_file(&mut config, &raw) {
            warn!("config: ignoring unreadable {CONFIG_FILE}: {err}");
        }
    }

    apply_env(&mut config, |key| std::env::var(key).ok());
    config
}

/// Like [`load_config`] but with an explicit file that must exist and parse.
pub fn load_config_from(path: &Path) -> anyhow::Result<CatalogConfig> {
    let mut config = CatalogConfig::default();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog config '{}'", path.display()))?;
    apply_file(&mut config, &raw)
        .with_context(|| format!("failed to parse catalog config '{}'", path.display()))?;
    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn apply_file(config: &mut CatalogConfig, raw: &str) -> Result<(), toml::de::Error> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("api_key") {
        config.api_key = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("base_url") {
        config.base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("language") {
        config.language = v.clone();
    }
    Ok(())
}

fn apply_env(config: &mut CatalogConfig, lookup: impl Fn(&str) -> Option<String>) {
    for var in API_KEY_VARS {
        if let Some(v) = lookup(var) {
            config.api_key = Some(v);
        }
    }
    if let Some(v) = lookup("CATALOG__BASE_URL") {
        config.base_url = v;
    }
    if let Some(v) = lookup("CATALOG__LANGUAGE") {
        config.language = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_public_catalog_without_key() {
        let config = CatalogConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.language, "en-US");
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn file_values_are_applied() {
        let mut config = CatalogConfig::default();
        apply_file(
            &mut config,
            "api_key = \"from-file\"\nbase_url = \"http://localhost:9000/3\"\nlanguage = \"de-DE\"\n",
        )
        .expect("parse");
        assert_eq!(config.api_key(), Some("from-file"));
        assert_eq!(config.base_url, "http://localhost:9000/3");
        assert_eq!(config.language, "de-DE");
    }

    #[test]
    fn env_overrides_file_and_most_specific_key_wins() {
        let mut config = CatalogConfig::default().with_api_key("from-file");
        apply_env(
            &mut config,
            env(&[
                ("EXPO_PUBLIC_MOVIE_API_KEY", "expo"),
                ("CATALOG__API_KEY", "explicit"),
                ("CATALOG__LANGUAGE", "fr-FR"),
            ]),
        );
        assert_eq!(config.api_key(), Some("explicit"));
        assert_eq!(config.language, "fr-FR");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = CatalogConfig::default().with_api_key("   ");
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn malformed_file_is_rejected() {
        let mut config = CatalogConfig::default();
        assert!(apply_file(&mut config, "api_key = [1, 2").is_err());
    }
}
