//! Hostnames permitted to pull certificates.

use serde::Deserialize;
use std::collections::HashSet;

/// An immutable set of hostnames that pass [FCrDNS][crate::fcrdns] authorization.
///
/// Entries are stored trimmed, ASCII-lowercased and without a trailing root label separator, so
/// lookups are case-insensitive and treat `host.example.com` and `host.example.com.` alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct Allowlist {
    hosts: HashSet<String>,
}

impl Allowlist {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Returns true if `hostname` is allowlisted, ignoring case and a trailing `.`.
    #[must_use]
    pub fn contains(&self, hostname: &str) -> bool {
        self.hosts.contains(&normalize(hostname))
    }
}

fn normalize(hostname: &str) -> String {
    let hostname = hostname.trim();
    hostname
        .strip_suffix('.')
        .unwrap_or(hostname)
        .to_ascii_lowercase()
}

impl<S: AsRef<str>> FromIterator<S> for Allowlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let hosts = iter
            .into_iter()
            .map(|h| normalize(h.as_ref()))
            .filter(|h| !h.is_empty())
            .collect();
        Allowlist { hosts }
    }
}

impl From<Vec<String>> for Allowlist {
    fn from(hosts: Vec<String>) -> Self {
        hosts.into_iter().collect()
    }
}
