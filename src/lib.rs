//! Cert Crab
//!
//! A small certificate distribution service for hosts that can't run their own ACME client.
//!
//! A central host obtains certificates (e.g. with [DNS-01] challenges, using the
//! [`/set_txt` endpoint][crate::api#set_txt-post] to publish challenge responses) and keeps them
//! in a [Let's Encrypt] style `live/{domain}/` tree. Remote hosts then pull their certificate
//! material over HTTP. A pull must present a bearer credential and come from an address whose
//! [Forward-Confirmed Reverse DNS][crate::fcrdns] resolves to an allowlisted hostname.
//!
//! [DNS-01]: https://www.rfc-editor.org/rfc/rfc8555#section-8.4
//! [Let's Encrypt]: https://eff-certbot.readthedocs.io/en/stable/using.html#where-are-my-certificates
//!
#![warn(clippy::pedantic)]

pub mod allowlist;
pub mod api;
pub mod auth;
pub mod certs;
pub mod config;
pub mod error;
pub mod fcrdns;
pub mod txt_writer;

pub use allowlist::Allowlist;
pub use api::new as new_http;
pub use certs::CertGate;
pub use config::{Config, SharedConfig};
pub use fcrdns::{DynResolver, HostResolver, SystemResolver};
pub use txt_writer::{CommandTxtWriter, InMemoryTxtWriter};
