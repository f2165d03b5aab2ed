pub mod error;

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use error::ConfigLoadError;

use crate::constants::env as env_keys;
use crate::models::PreviewConfig;

/// Source that produced the preview configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl PreviewConfig {
    /// Load preview configuration.
    /// Evaluation order:
    /// 1) `$HOVERREEL_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$HOVERREEL_CONFIG_JSON` (inline JSON),
    /// 3) the first default file that exists,
    /// 4) built-in defaults.
    ///
    /// A `.env` file in the working directory is honoured for the two
    /// variables above.
    pub fn load_from_env()
    -> Result<(Self, PreviewConfigSource), ConfigLoadError> {
        let _ = dotenvy::dotenv();

        if let Ok(path_str) = env::var(env_keys::CONFIG_PATH)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, PreviewConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(env_keys::CONFIG_JSON)
            && !raw.trim().is_empty()
        {
            let config = Self::parse_json(&raw)?;
            return Ok((config, PreviewConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, PreviewConfigSource::File(path)));
        }

        log::debug!("no preview config found, using defaults");
        Ok((Self::default(), PreviewConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let origin = path.display().to_string();

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents).map_err(|err| {
                ConfigLoadError::Invalid {
                    origin: origin.clone(),
                    message: err.to_string(),
                }
            })?,
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    ConfigLoadError::Invalid {
                        origin: origin.clone(),
                        message: err.to_string(),
                    }
                })?
            }
            _ => return Self::parse_from_str(&contents, &origin),
        };

        Self::checked(config, &origin)
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> Result<Self, ConfigLoadError> {
        // Try TOML first, then JSON for convenience.
        let config = toml::from_str::<Self>(contents).or_else(|toml_err| {
            serde_json::from_str::<Self>(contents).map_err(|json_err| {
                ConfigLoadError::Parse {
                    origin: origin.to_string(),
                    toml: toml_err.to_string(),
                    json: json_err.to_string(),
                }
            })
        })?;
        Self::checked(config, origin)
    }

    pub fn parse_json(raw: &str) -> Result<Self, ConfigLoadError> {
        let origin = env_keys::CONFIG_JSON;
        let config = serde_json::from_str(raw).map_err(|err| {
            ConfigLoadError::Invalid {
                origin: origin.to_string(),
                message: err.to_string(),
            }
        })?;
        Self::checked(config, origin)
    }

    fn checked(config: Self, origin: &str) -> Result<Self, ConfigLoadError> {
        config
            .validate()
            .map_err(|source| ConfigLoadError::GuardRail {
                origin: origin.to_string(),
                source,
            })?;
        log::debug!("loaded preview config from {origin}");
        Ok(config)
    }

    fn find_default_file() -> Option<PathBuf> {
        env_keys::DEFAULT_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}
