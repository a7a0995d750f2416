use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ConfigError, UnknownMode};
use crate::validator::{parse_max_age, validate};

pub const DEFAULT_MODE: &str = "testing";
pub const DEFAULT_MAX_AGE: &str = "86400";
pub const DEFAULT_PORT: &str = "8080";

/// Policy enforcement level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Report-only.
    Testing,
    Enforce,
    /// Withdraws a previously published policy.
    None,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Testing => "testing",
            Self::Enforce => "enforce",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testing" => Ok(Self::Testing),
            "enforce" => Ok(Self::Enforce),
            "none" => Ok(Self::None),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Merged parameters, before validation. Values stay textual so that the
/// validator can report what the operator actually typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub domain: String,
    pub mode: String,
    pub mx: Vec<String>,
    pub max_age: String,
    pub port: String,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            domain: String::new(),
            mode: DEFAULT_MODE.to_string(),
            mx: Vec::new(),
            max_age: DEFAULT_MAX_AGE.to_string(),
            port: DEFAULT_PORT.to_string(),
            verbose: false,
        }
    }
}

/// A validated configuration. Only obtainable through [`Config::from_settings`],
/// and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    domain: String,
    mode: Mode,
    #[serde(rename = "mx")]
    mx_hosts: Vec<String>,
    max_age: u64,
    port: String,
    verbose: bool,
}

impl Config {
    /// Validate `settings`, collecting every violation into
    /// [`ConfigError::Invalid`].
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let violations = validate(&settings);
        let parsed = settings
            .mode
            .parse::<Mode>()
            .ok()
            .zip(parse_max_age(&settings.max_age));

        match parsed {
            Some((mode, max_age)) if violations.is_empty() => Ok(Self {
                domain: settings.domain,
                mode,
                mx_hosts: settings.mx,
                max_age,
                port: settings.port,
                verbose: settings.verbose,
            }),
            _ => Err(ConfigError::invalid(violations)),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mx_hosts(&self) -> &[String] {
        &self.mx_hosts
    }

    pub fn max_age(&self) -> u64 {
        self.max_age
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Address the HTTP server binds: every interface, configured port.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl TryFrom<Settings> for Config {
    type Error = ConfigError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        Self::from_settings(settings)
    }
}
