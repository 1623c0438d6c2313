use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings(config_path: &Path) -> Settings {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

/// Defaults, then the config file if present, then environment overrides.
pub fn load_settings_with(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
            }
            Err(error) => {
                warn!(path = %config_path.display(), %error, "ignoring unreadable config file");
            }
        }
    }

    if let Some(v) = env("ASSESSMENT_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
