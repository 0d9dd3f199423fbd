use crate::allowlist::Allowlist;
use crate::error::Error;
use crate::txt_writer::{CommandTxtWriter, DynTxtWriter, InMemoryTxtWriter};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

/// Service configuration, loaded once at startup from a JSON file.
///
/// ```json
/// {
///   "api_bind_addr": "0.0.0.0:5000",
///   "api_timeout": 10,
///   "dns_timeout": 3,
///   "api_key": "txt-writer-secret",
///   "txt_command": "/usr/local/bin/dns-proxy-cli",
///   "cert_bearer_token": "cert-secret",
///   "cert_dns_allowlist": ["client.example.com"],
///   "cert_base_dir": "/etc/letsencrypt/live"
/// }
/// ```
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_dns_timeout")]
    pub dns_timeout: Duration,
    /// Bearer credential for the [`/set_txt`][crate::api#set_txt-post] endpoint.
    pub api_key: String,
    /// Program invoked to set TXT records. Records are only kept in memory when unset.
    #[serde(default)]
    pub txt_command: Option<PathBuf>,
    /// Bearer credential for the [`/certs`][crate::api] endpoint.
    pub cert_bearer_token: String,
    pub cert_dns_allowlist: Allowlist,
    #[serde(default = "default_cert_base_dir")]
    pub cert_base_dir: PathBuf,
}

fn default_dns_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_cert_base_dir() -> PathBuf {
    PathBuf::from("/etc/letsencrypt/live")
}

impl Config {
    /// Load and validate a [`Config`] from the JSON file at `p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be read, [`Error::InvalidJSON`] if it isn't a
    /// valid config, and [`Error::MissingSetting`] if a credential or the allowlist is empty.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Build the [`DynTxtWriter`] described by [`Config::txt_command`].
    #[must_use]
    pub fn txt_writer(&self) -> DynTxtWriter {
        match &self.txt_command {
            Some(program) => Arc::new(CommandTxtWriter::new(program.clone())),
            None => Arc::new(InMemoryTxtWriter::default()),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.api_key.is_empty() {
            return Err(Error::MissingSetting("api_key"));
        }
        if self.cert_bearer_token.is_empty() {
            return Err(Error::MissingSetting("cert_bearer_token"));
        }
        if self.cert_dns_allowlist.is_empty() {
            return Err(Error::MissingSetting("cert_dns_allowlist"));
        }
        Ok(())
    }
}
