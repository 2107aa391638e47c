use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use shared::{domain::ModelId, error::LookupError};
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const CONFIG_FILE_NAME: &str = "glossary.toml";
pub const API_KEY_SETTING: &str = "API_KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            font_path: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("font_path", &self.font_path)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_key: Option<String>,
    model: Option<String>,
    api_base_url: Option<String>,
    font_path: Option<PathBuf>,
}

impl Settings {
    /// Layers defaults, the TOML config file and environment variables, in
    /// that order. `env` is consulted for every supported variable.
    pub fn from_sources(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(raw) = file {
            match toml::from_str::<FileSettings>(raw) {
                Ok(file_cfg) => {
                    if let Some(v) = non_blank(file_cfg.api_key) {
                        settings.api_key = Some(v);
                    }
                    if let Some(v) = non_blank(file_cfg.model) {
                        settings.model = v;
                    }
                    if let Some(v) = non_blank(file_cfg.api_base_url) {
                        settings.api_base_url = v;
                    }
                    if let Some(v) = file_cfg.font_path {
                        settings.font_path = Some(v);
                    }
                }
                Err(error) => warn!(%error, "ignoring malformed glossary config file"),
            }
        }

        let read = |name: &str| non_blank(env(name));

        for name in [API_KEY_SETTING, "GEMINI_API_KEY", "APP__API_KEY"] {
            if let Some(v) = read(name) {
                settings.api_key = Some(v);
            }
        }
        if let Some(v) = read("APP__MODEL") {
            settings.model = v;
        }
        if let Some(v) = read("APP__API_BASE_URL") {
            settings.api_base_url = v;
        }
        if let Some(v) = read("APP__FONT_PATH") {
            settings.font_path = Some(PathBuf::from(v));
        }

        settings
    }

    pub fn require_api_key(&self) -> Result<&str, LookupError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(LookupError::ConfigurationMissing {
                setting: API_KEY_SETTING,
            })
    }

    pub fn model_id(&self) -> ModelId {
        ModelId(self.model.clone())
    }
}

/// Loads settings from `glossary.toml` and the process environment. A missing
/// `glossary.toml` is not an error. A file named by `GLOSSARY_CONFIG` that
/// cannot be read is reported and skipped.
pub fn load_settings() -> Settings {
    let env = |name: &str| std::env::var(name).ok();
    match non_blank(std::env::var("GLOSSARY_CONFIG").ok()) {
        Some(path) => load_settings_from(Path::new(&path), env).unwrap_or_else(|error| {
            warn!(%path, "ignoring GLOSSARY_CONFIG: {error:#}");
            Settings::from_sources(None, env)
        }),
        None => {
            let raw = fs::read_to_string(CONFIG_FILE_NAME).ok();
            Settings::from_sources(raw.as_deref(), env)
        }
    }
}

/// Loads settings from an explicitly chosen config file. Unlike the default
/// `glossary.toml`, the file must exist and be readable.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    Ok(Settings::from_sources(Some(&raw), env))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
