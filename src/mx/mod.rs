//! MX auto-discovery for the policy domain.
//!
//! [`discover`] runs a single bounded MX query through the system resolver and
//! returns the exchanges in ascending preference order, without their trailing
//! root dot. It is only called at startup, and only when no MX host was given
//! explicitly.

mod error;
mod resolver;
mod types;

pub use error::DiscoveryError;
pub use resolver::{LOOKUP_TIMEOUT, LookupMx, discover, discover_with};
pub use types::MxRecord;
