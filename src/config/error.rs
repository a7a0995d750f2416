use std::path::PathBuf;

use thiserror::Error;

use crate::mx::DiscoveryError;

/// The configuration could not be turned into a valid [`Config`](super::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Every violated invariant, in field order.
    #[error("invalid configuration:\n{}", .violations.join("\n"))]
    Invalid { violations: Vec<String> },
    #[error("cannot read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file {}: {source}", .path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("config file {} must contain a mapping of keys to values", .path.display())]
    NotAMapping { path: PathBuf },
}

impl ConfigError {
    pub(crate) fn invalid(violations: Vec<String>) -> Self {
        Self::Invalid { violations }
    }

    pub(crate) fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse_file(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::ParseFile {
            path: path.into(),
            source,
        }
    }

    /// The individual violations; empty for file errors.
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Invalid { violations } => violations,
            _ => &[],
        }
    }
}

/// Writing the resolved configuration back to disk failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("HOME is not set, pass --config to choose where the config file goes")]
    NoHome,
    #[error("config file {} already exists (use --force to overwrite)", .path.display())]
    AlreadyExists { path: PathBuf },
    #[error("cannot create config directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize config: {source}")]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },
}

impl PersistenceError {
    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialize(source: serde_yaml::Error) -> Self {
        Self::Serialize { source }
    }
}

/// Anything that aborts startup before the server is allowed to serve.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("MX auto-discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),
}

impl StartupError {
    /// Process exit status: 1 for configuration errors, 2 for DNS failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,
            Self::Discovery(_) => 2,
        }
    }
}

/// A mode string other than `testing`, `enforce` or `none`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}'")]
pub struct UnknownMode(pub String);
