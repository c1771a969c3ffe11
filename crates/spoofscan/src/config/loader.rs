use std::path::{Path, PathBuf};

use crate::config::schema::{Config, CONFIG_VERSION};
use crate::error::ConfigError;
use crate::secrets::has_secret_source;

const CONFIG_DIR_NAME: &str = "spoofscan";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default config location under the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the config at `path` if it exists, otherwise the built-in defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) if path.exists() => load_config(path),
        _ => Ok(Config::default()),
    }
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    let analyzer = &config.analyzer;

    if !(analyzer.base_url.starts_with("http://") || analyzer.base_url.starts_with("https://")) {
        return Err(ConfigError::Validation {
            message: format!(
                "analyzer.base_url must be an http(s) URL: {}",
                analyzer.base_url
            ),
        });
    }

    if analyzer.model.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "analyzer.model must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&analyzer.temperature) {
        return Err(ConfigError::Validation {
            message: format!(
                "analyzer.temperature must be between 0.0 and 2.0, got {}",
                analyzer.temperature
            ),
        });
    }

    if analyzer.connect_timeout_secs == 0 || analyzer.request_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "analyzer timeouts must be greater than zero".to_string(),
        });
    }

    if !has_secret_source(
        analyzer.api_key.as_deref(),
        analyzer.api_key_file.as_deref(),
        analyzer.api_key_env_var.as_deref(),
    ) {
        return Err(ConfigError::Validation {
            message: "analyzer needs one of api_key, api_key_file or api_key_env_var".to_string(),
        });
    }

    Ok(())
}
