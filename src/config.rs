use std::env;
use std::path::{Path, PathBuf};

use ini::{Ini, Properties};
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_SECTION: &str = "Default";
pub const DEFAULT_IMAGE_FOLDER: &str = "/Images";

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub token: SecretString,
    pub per_page: u32,
    pub image_folder: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: SecretString::from(token.into()),
            per_page: 100,
            image_folder: DEFAULT_IMAGE_FOLDER.to_string(),
            request_timeout_secs: 30,
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let base_url = lookup("CANVAS_URL")
            .ok_or_else(|| AppError::ConfigError("CANVAS_URL is not set".to_string()))?;
        let token = lookup("CANVAS_TOKEN")
            .ok_or_else(|| AppError::ConfigError("CANVAS_TOKEN is not set".to_string()))?;

        let mut config = Self::new(base_url, token);
        if let Some(per_page) = lookup("CANVAS_PER_PAGE").and_then(|p| p.parse().ok()) {
            config.per_page = per_page;
        }
        if let Some(folder) = lookup("CANVAS_IMAGE_FOLDER") {
            config.image_folder = folder;
        }
        if let Some(timeout) = lookup("CANVAS_TIMEOUT_SECS").and_then(|t| t.parse().ok()) {
            config.request_timeout_secs = timeout;
        }
        Ok(config)
    }

    /// Parses a `canvas.conf` INI profile. Each site is a section holding `URL` and `Token`;
    /// section names are matched literally, so `Sites.GC` is one section.
    pub fn from_profile_str(contents: &str, section: &str) -> AppResult<Self> {
        let profile = Ini::load_from_str(contents)?;
        let properties = profile.section(Some(section)).ok_or_else(|| {
            AppError::ConfigError(format!("section '{}' not found in profile", section))
        })?;

        let url = profile_value(properties, "url", section)?;
        let token = profile_value(properties, "token", section)?;
        Ok(Self::new(url, token))
    }

    pub fn from_profile_file(path: &Path, section: &str) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("cannot read profile {}: {}", path.display(), e))
        })?;
        Self::from_profile_str(&contents, section)
    }

    /// Environment wins when both `CANVAS_URL` and `CANVAS_TOKEN` are set, otherwise the
    /// profile in `$HOME/.canvasctl/canvas.conf` is used.
    pub fn load(section: Option<&str>) -> AppResult<Self> {
        if env::var("CANVAS_URL").is_ok() && env::var("CANVAS_TOKEN").is_ok() {
            log::debug!("Loading Canvas configuration from environment");
            return Self::from_env();
        }

        let section = section.unwrap_or(DEFAULT_SECTION);
        let path = default_profile_path()?;
        log::debug!(
            "Loading Canvas configuration section '{}' from {}",
            section,
            path.display()
        );
        Self::from_profile_file(&path, section)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self::new("https://canvas.example.edu", "test_token")
    }
}

fn profile_value(properties: &Properties, key: &str, section: &str) -> AppResult<String> {
    properties
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| strip_quotes(v.trim()).to_string())
        .ok_or_else(|| {
            AppError::ConfigError(format!("key '{}' missing in section '{}'", key, section))
        })
}

/// Values may be written quoted or bare.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

pub fn default_profile_path() -> AppResult<PathBuf> {
    let home = env::var("HOME")
        .map_err(|_| AppError::ConfigError("HOME is not set".to_string()))?;
    Ok(PathBuf::from(home).join(".canvasctl").join("canvas.conf"))
}
