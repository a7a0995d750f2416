use std::path::Path;

use super::{ConfigError, Settings, file};

pub const ENV_DOMAIN: &str = "DOMAIN";
pub const ENV_MODE: &str = "STS_MODE";
pub const ENV_MX: &str = "STS_MX";
pub const ENV_MAX_AGE: &str = "STS_MAX_AGE";

/// Values supplied by one parameter source. `None` means "not supplied here".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    pub domain: Option<String>,
    pub mode: Option<String>,
    /// Comma-separated list, as typed on the command line.
    pub mx: Option<String>,
    pub max_age: Option<String>,
    pub port: Option<String>,
    pub verbose: Option<bool>,
}

impl Layer {
    /// Read `DOMAIN`, `STS_MODE`, `STS_MX` and `STS_MAX_AGE` from the process
    /// environment.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Layer::from_env`] with a custom lookup. Blank variables count as
    /// unset.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            domain: get(ENV_DOMAIN),
            mode: get(ENV_MODE),
            mx: get(ENV_MX),
            max_age: get(ENV_MAX_AGE),
            port: None,
            verbose: None,
        }
    }

    /// Read the YAML config file. A missing file is an empty layer.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        file::load(path)
    }

    /// Field-wise fallback: keep our value, otherwise take `lower`'s.
    pub fn or(self, lower: Layer) -> Layer {
        Layer {
            domain: self.domain.or(lower.domain),
            mode: self.mode.or(lower.mode),
            mx: self.mx.or(lower.mx),
            max_age: self.max_age.or(lower.max_age),
            port: self.port.or(lower.port),
            verbose: self.verbose.or(lower.verbose),
        }
    }

    /// Fill the gaps with built-in defaults.
    pub fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        let text = |value: Option<String>, default: String| {
            value.map(|v| v.trim().to_string()).unwrap_or(default)
        };
        Settings {
            domain: text(self.domain, defaults.domain),
            mode: text(self.mode, defaults.mode),
            mx: self.mx.as_deref().map(split_mx).unwrap_or(defaults.mx),
            max_age: text(self.max_age, defaults.max_age),
            port: text(self.port, defaults.port),
            verbose: self.verbose.unwrap_or(defaults.verbose),
        }
    }
}

/// Split a comma-separated MX value. A blank value means "no MX configured";
/// empty entries inside a non-blank list are kept so the validator flags them.
pub fn split_mx(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|host| host.trim().to_string()).collect()
}

/// The parameter sources, highest precedence first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources {
    pub flags: Layer,
    pub env: Layer,
    pub file: Layer,
}

impl Sources {
    /// Collect the environment and, when a path is given, the config file.
    pub fn load(flags: Layer, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => Layer::from_file(path)?,
            None => {
                tracing::debug!("no config file location, skipping file layer");
                Layer::default()
            }
        };
        Ok(Self {
            flags,
            env: Layer::from_env(),
            file,
        })
    }

    /// flag > environment > config file > default.
    pub fn merge(&self) -> Settings {
        self.flags
            .clone()
            .or(self.env.clone())
            .or(self.file.clone())
            .into_settings()
    }
}
