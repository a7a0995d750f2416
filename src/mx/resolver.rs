use std::time::Duration;

use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    system_conf::read_system_conf,
};

use super::{DiscoveryError, MxRecord};

/// Upper bound for the one MX query made at startup.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Lookup the MX hosts of `domain` using the system resolver configuration,
/// with a single attempt bounded by [`LOOKUP_TIMEOUT`].
pub fn discover(domain: &str) -> Result<Vec<String>, DiscoveryError> {
    let resolver = build_resolver()?;
    discover_with(&resolver, domain)
}

/// Same as [`discover`] against any [`LookupMx`] implementation.
///
/// The domain is normalized via IDNA before querying. Hosts come back sorted by
/// ascending preference (ties keep the resolver order), de-duplicated, and
/// without the root dot. A null MX (`.`) yields no host.
pub fn discover_with<R>(resolver: &R, domain: &str) -> Result<Vec<String>, DiscoveryError>
where
    R: LookupMx + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    let mut records = resolver.lookup_mx(&ascii)?;
    records.sort_by_key(|record| record.preference);

    let mut hosts: Vec<String> = Vec::with_capacity(records.len());
    for record in records {
        let host = normalize_exchange(&record.exchange);
        if host.is_empty() || hosts.contains(&host) {
            continue;
        }
        hosts.push(host);
    }

    tracing::debug!(domain = %ascii, hosts = ?hosts, "MX discovery finished");
    Ok(hosts)
}

fn build_resolver() -> Result<Resolver, DiscoveryError> {
    let (config, mut opts) = read_system_conf()
        .map_err(|err| DiscoveryError::resolver_init(std::io::Error::other(err)))?;
    opts.timeout = LOOKUP_TIMEOUT;
    opts.attempts = 1;
    Resolver::new(config, opts).map_err(DiscoveryError::resolver_init)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, DiscoveryError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(DiscoveryError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(DiscoveryError::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Source of MX answers. Implemented for the trust-dns [`Resolver`]; tests
/// plug a stub in.
pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DiscoveryError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DiscoveryError> {
        let lookup = match Resolver::mx_lookup(self, domain) {
            Ok(lookup) => lookup,
            Err(err) => return classify_failure(domain, err),
        };
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(&mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

/// A zone answering NOERROR without MX records is a legitimate empty answer;
/// NXDOMAIN and transport failures are not.
pub(crate) fn classify_failure(
    domain: &str,
    err: ResolveError,
) -> Result<Vec<MxRecord>, DiscoveryError> {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                Err(DiscoveryError::nx_domain(domain))
            } else {
                Ok(Vec::new())
            }
        }
        _ => Err(DiscoveryError::lookup(domain, err)),
    }
}
