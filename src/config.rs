//! Credential and model resolution.
//!
//! The API key and base URL are resolved as: explicit override, then
//! environment, then `~/.config/cerebras/config`, then the built-in default.
//! The model is the exception: a `cerebras_model` line in the config file
//! beats `CEREBRAS_MODEL`, so its order is override, file, environment,
//! default. An empty string is treated as unset at every layer; any other
//! value, whitespace included, is used exactly as given.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::client::ClientError;
use crate::model::DEFAULT_MODEL;
use crate::options::SecretString;

pub const API_KEY_ENV: &str = "CEREBRAS_API_KEY";
pub const MODEL_ENV: &str = "CEREBRAS_MODEL";
pub const BASE_URL_ENV: &str = "CEREBRAS_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1";

const FILE_KEY_API_KEY: &str = "cerebras_api_key";
const FILE_KEY_MODEL: &str = "cerebras_model";
const FILE_KEY_BASE_URL: &str = "cerebras_base_url";

/// Settings after all layers have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
}

impl ResolvedConfig {
    /// The API key, or the configuration error reported to the user.
    pub fn require_api_key(&self) -> Result<SecretString, ClientError> {
        self.api_key.clone().ok_or_else(|| {
            ClientError::Config(format!(
                "{API_KEY_ENV} not set. Export it or add to ~/.config/cerebras/config"
            ))
        })
    }
}

/// Values given explicitly by the caller, e.g. from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Contents of the `key=value` config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Parse `key=value` lines. Blank lines, `#` comments and lines without
    /// `=` are skipped; keys are case-insensitive; values lose surrounding
    /// quotes. Later lines win.
    pub fn parse(contents: &str) -> Self {
        let mut config = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'').to_string();

            match key.trim().to_lowercase().as_str() {
                FILE_KEY_API_KEY => config.api_key = Some(value),
                FILE_KEY_MODEL => config.model = Some(value),
                FILE_KEY_BASE_URL => config.base_url = Some(value),
                _ => {}
            }
        }

        config
    }

    /// Read and parse the file at `path`; a missing or unreadable file is
    /// treated as empty.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded config file");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read config file");
                Self::default()
            }
        }
    }
}

/// `~/.config/cerebras/config`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("cerebras").join("config"))
}

/// Resolve from the process environment and the default config file.
pub fn resolve() -> ResolvedConfig {
    resolve_with_overrides(&ConfigOverrides::default())
}

/// Resolve from the process environment and the default config file, with
/// explicit overrides on top.
pub fn resolve_with_overrides(overrides: &ConfigOverrides) -> ResolvedConfig {
    resolve_with(
        overrides,
        |name| std::env::var(name).ok(),
        default_config_path().as_deref(),
    )
}

/// Resolve against an arbitrary environment lookup and config file path.
pub fn resolve_with<E>(
    overrides: &ConfigOverrides,
    env: E,
    config_path: Option<&Path>,
) -> ResolvedConfig
where
    E: Fn(&str) -> Option<String>,
{
    let file = config_path.map(FileConfig::load).unwrap_or_default();

    let api_key = first_set([
        overrides.api_key.clone(),
        env(API_KEY_ENV),
        file.api_key,
    ])
    .map(SecretString::new);

    let model = first_set([overrides.model.clone(), file.model, env(MODEL_ENV)])
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let base_url = first_set([
        overrides.base_url.clone(),
        env(BASE_URL_ENV),
        file.base_url,
    ])
    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        api_key,
        model,
        base_url,
    }
}

/// First layer holding a non-empty value, returned untouched.
fn first_set<const N: usize>(layers: [Option<String>; N]) -> Option<String> {
    layers.into_iter().flatten().find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_file() {
        let config = FileConfig::parse(
            "# Cerebras settings\n\
             \n\
             CEREBRAS_API_KEY = \"abc\"\n\
             cerebras_model='llama3.1-8b'\n\
             not a setting\n\
             other_key=ignored\n",
        );
        assert_eq!(
            config,
            FileConfig {
                api_key: Some("abc".to_string()),
                model: Some("llama3.1-8b".to_string()),
                base_url: None,
            }
        );
    }

    #[test]
    fn test_parse_keeps_equals_in_value() {
        let config = FileConfig::parse("cerebras_api_key=abc=def\n");
        assert_eq!(config.api_key.as_deref(), Some("abc=def"));
    }

    #[test]
    fn test_env_key_wins_over_file() {
        let file = config_file("cerebras_api_key = \"from-file\"\n");
        let config = resolve_with(
            &ConfigOverrides::default(),
            env_of(&[(API_KEY_ENV, "from-env")]),
            Some(file.path()),
        );
        assert_eq!(config.api_key, Some(SecretString::from("from-env")));
    }

    #[test]
    fn test_file_key_used_without_env() {
        let file = config_file("cerebras_api_key = \"abc\"\n");
        let config = resolve_with(&ConfigOverrides::default(), env_of(&[]), Some(file.path()));
        assert_eq!(config.require_api_key().unwrap().expose_secret(), "abc");
    }

    #[test]
    fn test_missing_key_everywhere() {
        let file = config_file("cerebras_model=qwen-3-32b\n");
        let config = resolve_with(&ConfigOverrides::default(), env_of(&[]), Some(file.path()));
        assert!(config.api_key.is_none());
        assert!(config.require_api_key().unwrap_err().is_config());
        assert_eq!(config.model, "qwen-3-32b");
    }

    #[test]
    fn test_empty_env_value_falls_through() {
        let file = config_file("cerebras_api_key=abc\n");
        let config = resolve_with(
            &ConfigOverrides::default(),
            env_of(&[(API_KEY_ENV, "")]),
            Some(file.path()),
        );
        assert_eq!(config.api_key, Some(SecretString::from("abc")));
    }

    #[test]
    fn test_override_beats_env_and_file() {
        let file = config_file("cerebras_model=llama-3.3-70b\n");
        let overrides = ConfigOverrides {
            model: Some("gpt-oss-120b".to_string()),
            ..Default::default()
        };
        let config = resolve_with(
            &overrides,
            env_of(&[(MODEL_ENV, "qwen-3-32b")]),
            Some(file.path()),
        );
        assert_eq!(config.model, "gpt-oss-120b");
    }

    #[test]
    fn test_file_model_beats_env_model() {
        let file = config_file("cerebras_model=from-file\n");
        let config = resolve_with(
            &ConfigOverrides::default(),
            env_of(&[(MODEL_ENV, "from-env")]),
            Some(file.path()),
        );
        assert_eq!(config.model, "from-file");
    }

    #[test]
    fn test_env_model_used_without_file_model() {
        let file = config_file("cerebras_api_key=abc\n");
        let config = resolve_with(
            &ConfigOverrides::default(),
            env_of(&[(MODEL_ENV, "qwen-3-32b")]),
            Some(file.path()),
        );
        assert_eq!(config.model, "qwen-3-32b");
    }

    #[test]
    fn test_empty_file_model_falls_through_to_env() {
        let file = config_file("cerebras_model=\"\"\n");
        let config = resolve_with(
            &ConfigOverrides::default(),
            env_of(&[(MODEL_ENV, "qwen-3-32b")]),
            Some(file.path()),
        );
        assert_eq!(config.model, "qwen-3-32b");
    }

    #[test]
    fn test_whitespace_value_is_kept_verbatim() {
        let file = config_file("cerebras_api_key=abc\n");
        let config = resolve_with(
            &ConfigOverrides::default(),
            env_of(&[(API_KEY_ENV, "  ")]),
            Some(file.path()),
        );
        assert_eq!(config.api_key, Some(SecretString::from("  ")));
    }

    #[test]
    fn test_defaults_without_any_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config");
        let config = resolve_with(&ConfigOverrides::default(), env_of(&[]), Some(missing.as_path()));
        assert_eq!(
            config,
            ResolvedConfig {
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            }
        );
    }

    #[test]
    fn test_base_url_from_env() {
        let config = resolve_with(
            &ConfigOverrides::default(),
            env_of(&[(BASE_URL_ENV, "http://localhost:9000/v1")]),
            None,
        );
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }
}
