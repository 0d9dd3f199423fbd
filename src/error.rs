//! Error types.

use std::net::IpAddr;
use std::path::PathBuf;

/// Error enumerates the possible Cert Crab error states.
///
/// The `Display` output of the variants returned to HTTP clients is deliberately minimal. Detail
/// needed by operators is logged where the error is raised instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when the `Authorization` header is missing or doesn't match the configured
    /// bearer credential. No distinction is made between a bad scheme and a bad secret.
    #[error("unauthorized")]
    Unauthorized,

    /// Returned when the transport level peer address of a request is unavailable, so FCrDNS
    /// verification can't be attempted.
    #[error("forbidden")]
    UnknownClient,

    /// Returned when the client address couldn't be forward-confirmed against a hostname in
    /// the [`Config::cert_dns_allowlist`][`crate::config::Config::cert_dns_allowlist`].
    #[error("forbidden")]
    Forbidden(IpAddr),

    /// Returned when the requested certificate path isn't of the form `{domain}/{file}`, or
    /// when the domain segment contains traversal tokens.
    #[error("bad request: expected /certs/{{domain}}/{{file}}")]
    MalformedPath,

    /// Returned for unknown file names, unknown domains and absent certificate files alike.
    #[error("not found")]
    NotFound,

    /// Returned when a certificate file exists but can't be read.
    #[error("failed to read {}", .path.display())]
    CertRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Returned when a [`/set_txt`][crate::api#set_txt-post] request has an empty field.
    #[error("invalid request body")]
    InvalidTxtRequest,

    /// Returned when the configured [`TxtWriter`][crate::txt_writer::TxtWriter] fails to set a
    /// record.
    #[error("TXT record writer failed: {0}")]
    TxtWriter(String),

    /// Returned when a required configuration value is empty.
    #[error("configuration value \"{0}\" must not be empty")]
    MissingSetting(&'static str),

    /// Returned when the system DNS resolver configuration can't be loaded, or the resolver
    /// can't be built from it.
    #[error("failed to create DNS resolver")]
    ResolverInit(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] fails due to
    /// invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
