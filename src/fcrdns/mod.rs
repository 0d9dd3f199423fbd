//! Forward-Confirmed Reverse DNS (FCrDNS) authorization.
//!
//! A client address is authorized when:
//!
//! 1. a reverse (`PTR`) lookup of the address yields a hostname,
//! 2. that hostname is in the configured [`Allowlist`], and
//! 3. a forward (`A`/`AAAA`) lookup of the hostname yields the original address again.
//!
//! `PTR` records alone are controlled by whoever holds reverse DNS delegation for an address
//! range. Requiring the forward lookup to agree means a client must also control forward DNS for
//! an allowlisted name, which is the anchor administrators actually configure.
//!
//! DNS access goes through the [`HostResolver`] trait. [`system::SystemResolver`] is backed by
//! the system resolver configuration; tests substitute fixed answers.

use crate::allowlist::Allowlist;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use trust_dns_resolver::error::ResolveError;

pub mod system;

pub use system::SystemResolver;

/// `DynResolver` is a shareable, type-erased [`HostResolver`].
pub type DynResolver = Arc<dyn HostResolver>;

/// Errors from a single DNS lookup. These never leave the verifier: they are logged and the
/// lookup is treated as unverified.
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Reverse and forward name resolution.
#[async_trait::async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `addr` to the hostnames of its `PTR` records, as returned by DNS (usually with a
    /// trailing `.`).
    async fn reverse(&self, addr: IpAddr) -> Result<Vec<String>, LookupError>;

    /// Resolve `hostname` to its `A` and `AAAA` addresses.
    async fn forward(&self, hostname: &str) -> Result<Vec<IpAddr>, LookupError>;
}

/// Returns true iff `client` forward-confirms against a hostname in `allowlist`.
///
/// An empty allowlist authorizes nobody, and no lookups are made. A failed forward lookup for one
/// candidate hostname doesn't stop the remaining candidates from being checked.
pub async fn is_authorized(
    resolver: &dyn HostResolver,
    client: IpAddr,
    allowlist: &Allowlist,
) -> bool {
    if allowlist.is_empty() {
        tracing::warn!("FCrDNS allowlist is empty, denying {client}");
        return false;
    }

    let candidates = match resolver.reverse(client).await {
        Ok(names) if !names.is_empty() => names,
        Ok(_) => {
            tracing::debug!("no PTR records for {client}");
            return false;
        }
        Err(err) => {
            tracing::debug!("reverse lookup for {client} failed: {err}");
            return false;
        }
    };

    for candidate in &candidates {
        let hostname = candidate.strip_suffix('.').unwrap_or(candidate);
        if !allowlist.contains(hostname) {
            continue;
        }

        match resolver.forward(hostname).await {
            Ok(addrs) if addrs.contains(&client) => {
                tracing::debug!("{client} forward-confirmed as \"{hostname}\"");
                return true;
            }
            Ok(_) => {
                tracing::debug!("\"{hostname}\" does not resolve back to {client}");
            }
            Err(err) => {
                tracing::debug!("forward lookup for \"{hostname}\" failed: {err}");
            }
        }
    }
    false
}
