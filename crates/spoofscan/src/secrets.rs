//! API key resolution for the analysis backend.
//!
//! A key is looked up in the config file first, then in a key file (the
//! `/run/secrets/...` pattern), then in an environment variable, `API_KEY`
//! unless configured otherwise. Only the first configured place is consulted.

use secrecy::SecretString;

/// Environment variable consulted for the API key when none is configured.
pub const DEFAULT_API_KEY_ENV_VAR: &str = "API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("No API key source provided (need one of: direct value, file path, or env var name)")]
    NoSourceProvided,

    #[error("Failed to read API key from file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variable '{name}' not set")]
    EnvVarNotSet { name: String },

    #[error("Environment variable '{name}' contains invalid UTF-8")]
    EnvVarNotUnicode { name: String },
}

pub type Result<T> = std::result::Result<T, SecretError>;

/// Where the API key is read from. Empty settings count as unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource<'a> {
    Direct(&'a str),
    File(&'a str),
    EnvVar(&'a str),
}

impl<'a> ApiKeySource<'a> {
    pub fn select(
        direct: Option<&'a str>,
        file_path: Option<&'a str>,
        env_var: Option<&'a str>,
    ) -> Option<Self> {
        let set = |value: Option<&'a str>| value.filter(|v| !v.is_empty());

        set(direct)
            .map(Self::Direct)
            .or_else(|| set(file_path).map(Self::File))
            .or_else(|| set(env_var).map(Self::EnvVar))
    }

    /// Reads the key. File and environment values are trimmed.
    pub fn read(self) -> Result<SecretString> {
        match self {
            Self::Direct(value) => Ok(SecretString::from(value)),
            Self::File(path) => {
                let expanded = expand_home(path);
                std::fs::read_to_string(&expanded)
                    .map(|content| SecretString::from(content.trim()))
                    .map_err(|source| SecretError::FileReadError {
                        path: expanded,
                        source,
                    })
            }
            Self::EnvVar(name) => match std::env::var(name) {
                Ok(value) => Ok(SecretString::from(value.trim())),
                Err(std::env::VarError::NotPresent) => Err(SecretError::EnvVarNotSet {
                    name: name.to_string(),
                }),
                Err(std::env::VarError::NotUnicode(_)) => Err(SecretError::EnvVarNotUnicode {
                    name: name.to_string(),
                }),
            },
        }
    }
}

pub fn resolve_secret(
    direct: Option<&str>,
    file_path: Option<&str>,
    env_var: Option<&str>,
) -> Result<SecretString> {
    ApiKeySource::select(direct, file_path, env_var)
        .ok_or(SecretError::NoSourceProvided)?
        .read()
}

pub fn has_secret_source(
    direct: Option<&str>,
    file_path: Option<&str>,
    env_var: Option<&str>,
) -> bool {
    ApiKeySource::select(direct, file_path, env_var).is_some()
}

/// Expands a leading `~` or `~/` to the user's home directory.
fn expand_home(path: &str) -> String {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            format!("{}{}", home.to_string_lossy(), rest)
        }
        _ => path.to_string(),
    }
}
