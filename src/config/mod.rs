//! Parameter resolution: merge flags, environment, config file and defaults,
//! fill missing MX hosts from DNS, then validate into a frozen [`Config`].

mod error;
mod file;
mod layer;
mod types;

pub use error::{ConfigError, PersistenceError, StartupError, UnknownMode};
pub use file::{default_config_path, save};
pub use layer::{ENV_DOMAIN, ENV_MAX_AGE, ENV_MODE, ENV_MX, Layer, Sources, split_mx};
pub use types::{Config, DEFAULT_MAX_AGE, DEFAULT_MODE, DEFAULT_PORT, Mode, Settings};

use crate::mx::{self, DiscoveryError, LookupMx};
use crate::validator::validate;

/// Resolve and validate the configuration, discovering MX hosts through the
/// system resolver when none were supplied.
pub fn resolve(sources: &Sources) -> Result<Config, StartupError> {
    resolve_inner(sources, mx::discover)
}

/// Same as [`resolve`] against any [`LookupMx`] implementation.
pub fn resolve_with<R>(sources: &Sources, resolver: &R) -> Result<Config, StartupError>
where
    R: LookupMx + ?Sized,
{
    resolve_inner(sources, |domain| mx::discover_with(resolver, domain))
}

fn resolve_inner<F>(sources: &Sources, discover: F) -> Result<Config, StartupError>
where
    F: FnOnce(&str) -> Result<Vec<String>, DiscoveryError>,
{
    let mut settings = sources.merge();

    // An unusable configuration aborts with every violation before any DNS
    // traffic; discovery then only has to fill the MX list.
    let violations = validate(&settings);
    if !violations.is_empty() {
        return Err(ConfigError::invalid(violations).into());
    }

    if settings.mx.is_empty() {
        tracing::info!(domain = %settings.domain, "no MX host configured, looking up MX records");
        settings.mx = discover(&settings.domain)?;
        if settings.mx.is_empty() {
            tracing::warn!(domain = %settings.domain, "domain has no MX records, policy will list none");
        }
    }

    let config = Config::from_settings(settings)?;
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}
