use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;

use super::{Config, ConfigError, Layer, Mode, PersistenceError};

/// `$HOME/.config/mta-sts-server/config.yaml`, if `HOME` is known.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("mta-sts-server")
                .join("config.yaml")
        })
}

pub(crate) fn load(path: &Path) -> Result<Layer, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "config file not found");
            return Ok(Layer::default());
        }
        Err(err) => return Err(ConfigError::read_file(path, err)),
    };
    let layer = parse(path, &contents)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(layer)
}

pub(crate) fn parse(path: &Path, contents: &str) -> Result<Layer, ConfigError> {
    if contents.trim().is_empty() {
        return Ok(Layer::default());
    }
    let document: Value =
        serde_yaml::from_str(contents).map_err(|err| ConfigError::parse_file(path, err))?;
    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Layer::default()),
        _ => {
            return Err(ConfigError::NotAMapping {
                path: path.to_path_buf(),
            });
        }
    };

    let get = |key: &str| mapping.get(key).and_then(scalar);
    Ok(Layer {
        domain: get("domain"),
        mode: get("mode"),
        mx: get("mx"),
        max_age: get("max_age"),
        port: get("port"),
        verbose: mapping.get("verbose").and_then(flag),
    })
}

/// Any YAML scalar as text; a sequence is joined with commas.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Sequence(items) => Some(
            items
                .iter()
                .filter_map(scalar)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Serialize)]
struct PersistedConfig<'a> {
    domain: &'a str,
    mode: Mode,
    mx: &'a [String],
    max_age: u64,
    port: &'a str,
    verbose: bool,
}

impl<'a> From<&'a Config> for PersistedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        Self {
            domain: config.domain(),
            mode: config.mode(),
            mx: config.mx_hosts(),
            max_age: config.max_age(),
            port: config.port(),
            verbose: config.verbose(),
        }
    }
}

/// Write `config` as YAML to `path`. Refuses to replace an existing file
/// unless `overwrite` is set.
pub fn save(config: &Config, path: &Path, overwrite: bool) -> Result<(), PersistenceError> {
    if !overwrite && path.exists() {
        return Err(PersistenceError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let yaml =
        serde_yaml::to_string(&PersistedConfig::from(config)).map_err(PersistenceError::serialize)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| PersistenceError::create_dir(parent, err))?;
    }
    write_all_atomically(path, yaml.as_bytes()).map_err(|err| PersistenceError::write(path, err))?;
    tracing::info!(path = %path.display(), "saved config file");
    Ok(())
}

fn write_all_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    fs::rename(&tmp, path)
}
