#![forbid(unsafe_code)]
//! mta_sts_server: publish an MTA-STS policy (RFC 8461) for one mail domain.
//!
//! Startup pipeline: [`resolve`] merges the parameter sources, fills missing MX
//! hosts from DNS and validates everything into a [`Config`]; [`render`] (or
//! [`PolicyRecord::new`]) turns it into the document that [`server`] serves at
//! `/.well-known/mta-sts.txt`.

pub mod config;
pub mod logging;
pub mod mx;
pub mod policy;
pub mod server;
pub mod validator;

pub use config::{
    Config, ConfigError, Layer, Mode, PersistenceError, Settings, Sources, StartupError,
    default_config_path, resolve, resolve_with, save,
};
pub use mx::{DiscoveryError, LookupMx, MxRecord, discover};
pub use policy::{PolicyRecord, render};
pub use validator::{is_valid_domain, is_valid_max_age, is_valid_mode, is_valid_mx, validate};
