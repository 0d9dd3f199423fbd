use crate::error::Error;
use std::fmt;

/// The closed set of certificate files that may be served. Nothing else under the certificate
/// root is ever readable through the API, whatever is present on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertFile {
    FullChain,
    PrivKey,
    Cert,
    Chain,
}

impl CertFile {
    pub const ALL: [CertFile; 4] = [
        CertFile::FullChain,
        CertFile::PrivKey,
        CertFile::Cert,
        CertFile::Chain,
    ];

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            CertFile::FullChain => "fullchain.pem",
            CertFile::PrivKey => "privkey.pem",
            CertFile::Cert => "cert.pem",
            CertFile::Chain => "chain.pem",
        }
    }

    /// Case-sensitive match of `name` against the allowed file names.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.file_name() == name)
    }
}

impl fmt::Display for CertFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A validated `{domain}/{file}` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertTarget<'a> {
    pub domain: &'a str,
    pub file: CertFile,
}

/// Validate the part of a certificate request path following the `/certs/` prefix.
///
/// # Errors
///
/// Returns [`Error::MalformedPath`] unless `raw` splits on its first `/` into two non-empty
/// segments, or if the domain segment contains `..`, `/` or `\`.
///
/// Returns [`Error::NotFound`] if the file segment isn't one of the [`CertFile`] names.
pub fn validate(raw: &str) -> Result<CertTarget<'_>, Error> {
    let (domain, file) = raw
        .split_once('/')
        .filter(|(domain, file)| !domain.is_empty() && !file.is_empty())
        .ok_or(Error::MalformedPath)?;

    if domain.contains("..") || domain.contains('/') || domain.contains('\\') {
        return Err(Error::MalformedPath);
    }

    let file = CertFile::from_file_name(file).ok_or(Error::NotFound)?;
    Ok(CertTarget { domain, file })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_each_allowed_file() {
        for file in CertFile::ALL {
            let raw = format!("example.org/{file}");
            let target = validate(&raw).unwrap();
            assert_eq!(target.domain, "example.org");
            assert_eq!(target.file, file);
        }
    }

    #[test]
    fn rejects_wrong_shape_as_malformed() {
        for raw in ["", "/", "example.org", "example.org/", "/fullchain.pem"] {
            assert!(matches!(validate(raw), Err(Error::MalformedPath)), "{raw:?}");
        }
    }

    #[test]
    fn rejects_traversal_in_domain_as_malformed() {
        for raw in [
            "../fullchain.pem",
            "..example.org/fullchain.pem",
            "example.org../fullchain.pem",
            "..\\etc/fullchain.pem",
            "example\\org/fullchain.pem",
        ] {
            assert!(matches!(validate(raw), Err(Error::MalformedPath)), "{raw:?}");
        }
    }

    #[test]
    fn traversal_wins_over_file_name_checks() {
        assert!(matches!(
            validate("../etc/passwd/fullchain.pem"),
            Err(Error::MalformedPath)
        ));
        assert!(matches!(
            validate("../secret.txt"),
            Err(Error::MalformedPath)
        ));
    }

    #[test]
    fn unknown_file_names_are_not_found() {
        for raw in [
            "example.org/secret.txt",
            "example.org/FULLCHAIN.PEM",
            "example.org/fullchain.pem ",
            "example.org/sub/fullchain.pem",
            "example.org/../fullchain.pem",
        ] {
            assert!(matches!(validate(raw), Err(Error::NotFound)), "{raw:?}");
        }
    }
}
