//! A [`HostResolver`][super::HostResolver] backed by the system resolver configuration.

use crate::error::Error;
use crate::fcrdns::{HostResolver, LookupError};
use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;
use trust_dns_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::TokioAsyncResolver;

/// Resolves names with the nameservers from the system configuration (e.g. `/etc/resolv.conf`).
///
/// Every lookup makes a single attempt and is bounded by the configured timeout. A timed out
/// lookup is reported as [`LookupError::Timeout`]. Forward lookups always query both `A` and
/// `AAAA` records.
#[allow(clippy::module_name_repetitions)]
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl SystemResolver {
    /// Create a resolver from the system configuration with the given per-lookup timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverInit`] if the system resolver configuration can't be read.
    pub fn from_system_conf(timeout: Duration) -> Result<Self, Error> {
        let (config, opts) = read_system_conf().map_err(|err| Error::ResolverInit(err.into()))?;
        Self::new(config, opts, timeout)
    }

    /// Create a resolver for the nameservers in `config`. The lookup timeout, attempt count and
    /// address family strategy in `opts` are overridden.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverInit`] if the resolver can't be constructed.
    pub fn new(
        config: ResolverConfig,
        mut opts: ResolverOpts,
        timeout: Duration,
    ) -> Result<Self, Error> {
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
        let resolver =
            TokioAsyncResolver::tokio(config, opts).map_err(|err| Error::ResolverInit(err.into()))?;
        Ok(SystemResolver { resolver, timeout })
    }

    async fn bounded<T>(
        &self,
        lookup: impl Future<Output = Result<T, ResolveError>>,
    ) -> Result<T, LookupError> {
        tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| LookupError::Timeout(self.timeout))?
            .map_err(|err| match err.kind() {
                ResolveErrorKind::Timeout => LookupError::Timeout(self.timeout),
                _ => LookupError::from(err),
            })
    }
}

#[async_trait::async_trait]
impl HostResolver for SystemResolver {
    async fn reverse(&self, addr: IpAddr) -> Result<Vec<String>, LookupError> {
        let names = self.bounded(self.resolver.reverse_lookup(addr)).await?;
        Ok(names.iter().map(ToString::to_string).collect())
    }

    async fn forward(&self, hostname: &str) -> Result<Vec<IpAddr>, LookupError> {
        // Query the absolute name so search domains are never appended.
        let fqdn = format!("{hostname}.");
        let addrs = self.bounded(self.resolver.lookup_ip(fqdn.as_str())).await?;
        Ok(addrs.iter().collect())
    }
}
