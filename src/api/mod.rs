//! HTTP API for pulling certificates and updating TXT records.
//!
//! Errors are returned as a JSON body of the form `{"error": "..."}`. The message is kept
//! minimal: it never says why a credential was rejected, and server side failures only ever
//! report `internal server error`.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!
//! ## `/certs/{domain}/{file}` (GET)
//!
//!   Returns the certificate file `{file}` for `{domain}` from
//!   [`Config::cert_base_dir`][`crate::config::Config::cert_base_dir`] with HTTP 200 (OK) and
//!   content type `application/x-pem-file`. `{file}` must be one of `fullchain.pem`,
//!   `privkey.pem`, `cert.pem` or `chain.pem`.
//!
//!   Requests must carry `Authorization: Bearer <cert_bearer_token>` and come from an address
//!   that passes [FCrDNS][crate::fcrdns] against
//!   [`Config::cert_dns_allowlist`][`crate::config::Config::cert_dns_allowlist`]:
//!
//!   ```bash
//!   ❯ curl -H 'Authorization: Bearer XXXX' \
//!       https://certs.example.com:5000/certs/example.org/fullchain.pem
//!   ```
//!
//!   | Status | Reason                                                       |
//!   |--------|--------------------------------------------------------------|
//!   | 401    | missing or incorrect credential                              |
//!   | 403    | FCrDNS verification failed, or the peer address is unknown   |
//!   | 400    | the path isn't `{domain}/{file}`, or the domain has `..`, `/` or `\` |
//!   | 404    | unknown file name, unknown domain, or the file is absent     |
//!   | 500    | the file exists but couldn't be read                         |
//!
//!   The checks run in the order of the table, so nothing about the filesystem is revealed to
//!   unauthorized callers.
//!
//! ## `/set_txt` (POST)
//!
//!   Requires `Authorization: Bearer <api_key>` and expects a JSON request body of the form:
//!
//!   ```json
//!   { "domain": "example.org", "key": "_acme-challenge", "value": "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX" }
//!   ```
//!
//!  All fields must be non-empty; their content is otherwise passed through unchanged. The
//!  record is handed to the configured [`TxtWriter`][crate::txt_writer::TxtWriter], and the
//!  request is echoed back with HTTP 200 (OK) on success.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::{new, router};
