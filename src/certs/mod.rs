//! Pull-based certificate distribution.
//!
//! Certificate material is read from `{cert_base_dir}/{domain}/{file}`, typically the
//! `/etc/letsencrypt/live` tree maintained by an ACME client. A [`CertGate`] decides whether a
//! request may read a file, in a fixed order where the first failing stage ends the request:
//!
//! 1. the `Authorization` header must carry the configured bearer credential,
//! 2. the transport level peer address must be known,
//! 3. the peer address must pass [FCrDNS][crate::fcrdns] against the allowlist,
//! 4. the requested path must [validate][path::validate],
//! 5. the file must exist and be readable.
//!
//! Steps 1 to 3 always run before anything about the requested path or the filesystem is
//! inspected, so unauthorized callers learn nothing about which certificates exist.

use crate::auth;
use crate::config::SharedConfig;
use crate::error::Error;
use crate::fcrdns::{self, DynResolver};
use std::net::SocketAddr;

pub mod files;
pub mod path;

pub use files::PEM_CONTENT_TYPE;
pub use path::{CertFile, CertTarget};

/// A single certificate request as seen by the [`CertGate`].
#[derive(Debug, Clone, Copy)]
pub struct CertRequest<'a> {
    /// Peer address of the connection the request arrived on.
    pub client_addr: Option<SocketAddr>,
    /// Raw `Authorization` header value.
    pub authorization: Option<&'a str>,
    /// Request path following the `/certs/` prefix.
    pub path: &'a str,
}

#[derive(Clone)]
pub struct CertGate {
    config: SharedConfig,
    resolver: DynResolver,
}

impl CertGate {
    #[must_use]
    pub fn new(config: SharedConfig, resolver: DynResolver) -> Self {
        CertGate { config, resolver }
    }

    /// Run `request` through every gating stage and return the certificate file contents.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage: [`Error::Unauthorized`],
    /// [`Error::UnknownClient`], [`Error::Forbidden`], [`Error::MalformedPath`],
    /// [`Error::NotFound`] or [`Error::CertRead`].
    pub async fn handle(&self, request: &CertRequest<'_>) -> Result<Vec<u8>, Error> {
        if !auth::bearer_matches(request.authorization, &self.config.cert_bearer_token) {
            tracing::info!(
                "denied certificate request from {}: bad credential",
                display_addr(request.client_addr)
            );
            return Err(Error::Unauthorized);
        }

        let Some(client_addr) = request.client_addr else {
            tracing::warn!("denied certificate request: peer address unavailable");
            return Err(Error::UnknownClient);
        };
        let client_ip = client_addr.ip().to_canonical();

        let allowlist = &self.config.cert_dns_allowlist;
        if !fcrdns::is_authorized(self.resolver.as_ref(), client_ip, allowlist).await {
            tracing::info!("denied certificate request from {client_ip}: not in DNS allowlist");
            return Err(Error::Forbidden(client_ip));
        }

        let target = path::validate(request.path).map_err(|err| {
            tracing::info!(
                "rejected certificate request from {client_ip} for \"{}\": {err}",
                request.path
            );
            err
        })?;

        files::serve(&self.config.cert_base_dir, &target, client_ip).await
    }
}

fn display_addr(addr: Option<SocketAddr>) -> String {
    addr.map_or_else(|| "unknown peer".to_string(), |a| a.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;
    use crate::fcrdns::testing::FakeResolver;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    const TOKEN: &str = "Bearer test-token";
    const CLIENT: &str = "203.0.113.5";

    fn gate(root: &Path, resolver: Arc<FakeResolver>) -> CertGate {
        let config = test_config(root);
        CertGate::new(Arc::new(config), resolver)
    }

    fn confirmed_resolver() -> Arc<FakeResolver> {
        Arc::new(
            FakeResolver::default()
                .with_ptr(CLIENT, &["client.example.com."])
                .with_addrs("client.example.com", &[CLIENT]),
        )
    }

    fn request<'a>(authorization: Option<&'a str>, path: &'a str) -> CertRequest<'a> {
        CertRequest {
            client_addr: Some(SocketAddr::new(CLIENT.parse().unwrap(), 40_000)),
            authorization,
            path,
        }
    }

    fn cert_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("example.org")).unwrap();
        fs::write(root.path().join("example.org/fullchain.pem"), b"FULLCHAIN").unwrap();
        fs::write(root.path().join("example.org/secret.txt"), b"SECRET").unwrap();
        root
    }

    #[tokio::test]
    async fn authorized_request_is_served_repeatably() {
        let root = cert_root();
        let gate = gate(root.path(), confirmed_resolver());
        let req = request(Some(TOKEN), "example.org/fullchain.pem");
        for _ in 0..2 {
            assert_eq!(gate.handle(&req).await.unwrap(), b"FULLCHAIN");
        }
    }

    #[tokio::test]
    async fn bad_credential_short_circuits_before_dns() {
        let root = cert_root();
        let resolver = confirmed_resolver();
        let gate = gate(root.path(), resolver.clone());
        for auth in [None, Some("Bearer wrong"), Some("test-token")] {
            let res = gate.handle(&request(auth, "example.org/fullchain.pem")).await;
            assert!(matches!(res, Err(Error::Unauthorized)), "{auth:?}");
        }
        assert_eq!(resolver.lookups(), 0);
    }

    #[tokio::test]
    async fn missing_peer_address_is_forbidden() {
        let root = cert_root();
        let resolver = confirmed_resolver();
        let gate = gate(root.path(), resolver.clone());
        let mut req = request(Some(TOKEN), "example.org/fullchain.pem");
        req.client_addr = None;
        assert!(matches!(gate.handle(&req).await, Err(Error::UnknownClient)));
        assert_eq!(resolver.lookups(), 0);
    }

    #[tokio::test]
    async fn unconfirmed_client_is_forbidden_before_path_checks() {
        let root = cert_root();
        let resolver = Arc::new(
            FakeResolver::default()
                .with_ptr(CLIENT, &["client.example.com."])
                .with_addrs("client.example.com", &["203.0.113.9"]),
        );
        let gate = gate(root.path(), resolver);
        for path in ["example.org/fullchain.pem", "../etc/passwd/fullchain.pem", "x"] {
            let res = gate.handle(&request(Some(TOKEN), path)).await;
            assert!(matches!(res, Err(Error::Forbidden(_))), "{path}");
        }
    }

    #[tokio::test]
    async fn ipv4_mapped_peer_is_verified_as_ipv4() {
        let root = cert_root();
        let gate = gate(root.path(), confirmed_resolver());
        let mut req = request(Some(TOKEN), "example.org/fullchain.pem");
        req.client_addr = Some("[::ffff:203.0.113.5]:40000".parse().unwrap());
        assert_eq!(gate.handle(&req).await.unwrap(), b"FULLCHAIN");
    }

    #[tokio::test]
    async fn path_failures_after_authorization() {
        let root = cert_root();
        let gate = gate(root.path(), confirmed_resolver());
        let cases: [(&str, fn(&Error) -> bool); 4] = [
            ("../etc/passwd/fullchain.pem", |e| {
                matches!(e, Error::MalformedPath)
            }),
            ("example.org", |e| matches!(e, Error::MalformedPath)),
            ("example.org/secret.txt", |e| matches!(e, Error::NotFound)),
            ("example.org/privkey.pem", |e| matches!(e, Error::NotFound)),
        ];
        for (path, expected) in cases {
            let err = gate.handle(&request(Some(TOKEN), path)).await.unwrap_err();
            assert!(expected(&err), "{path}: {err:?}");
        }
    }
}
