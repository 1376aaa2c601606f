use crate::dispatch::with_trailing_slash;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const ML_URL_ENV: &str = "CURVETOPIA_ML_URL";
pub const DEFAULT_ML_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid ML service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    ml_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ml_url: Url,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ml_url: parse_ml_url(DEFAULT_ML_URL).expect("DEFAULT_ML_URL is a valid http URL"),
        }
    }
}

impl Config {
    /// `~/.config/curvetopia/config.toml` or the platform equivalent.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("curvetopia").join("config.toml")
    }

    /// Resolves the ML service URL: environment, then config file, then the
    /// local development default.
    pub fn load() -> Result<Self, ConfigError> {
        let env_url = std::env::var(ML_URL_ENV).ok();
        Self::load_from(env_url.as_deref(), &Self::config_path())
    }

    pub fn load_from(env_url: Option<&str>, path: &Path) -> Result<Self, ConfigError> {
        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            debug!("Using ML service URL from {}", ML_URL_ENV);
            return Ok(Self {
                ml_url: parse_ml_url(url)?,
            });
        }

        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        match file.ml_url {
            Some(url) => {
                info!("Using ML service URL from {}", path.display());
                Ok(Self {
                    ml_url: parse_ml_url(&url)?,
                })
            }
            None => Ok(Self::default()),
        }
    }
}

fn parse_ml_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(with_trailing_slash(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(None, &dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.ml_url.as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "ml_url = \"https://ml.example.com/v1\"\n");
        let config = Config::load_from(None, &path).unwrap();
        assert_eq!(config.ml_url.as_str(), "https://ml.example.com/v1/");
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "ml_url = \"https://ml.example.com\"\n");
        let config = Config::load_from(Some("http://10.0.0.7:8000"), &path).unwrap();
        assert_eq!(config.ml_url.as_str(), "http://10.0.0.7:8000/");

        let config = Config::load_from(Some("   "), &path).unwrap();
        assert_eq!(config.ml_url.as_str(), "https://ml.example.com/");
    }

    #[test]
    fn file_without_url_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "# nothing here\n");
        let config = Config::load_from(None, &path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_inputs_are_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::load_from(Some("not a url"), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = Config::load_from(Some("ftp://ml.example.com"), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let path = write_config(&dir, "ml_url = [1, 2");
        let err = Config::load_from(None, &path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
