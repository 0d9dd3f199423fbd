use crate::certs::path::CertTarget;
use crate::error::Error;
use std::io::ErrorKind;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Content type of every served certificate file.
pub const PEM_CONTENT_TYPE: &str = "application/x-pem-file";

/// Path of `target` beneath `root`.
///
/// `target` must come from [`validate`][super::path::validate]: its domain holds no traversal
/// tokens and its file name is from the closed [`CertFile`][super::path::CertFile] set, so the
/// result stays beneath `root`.
#[must_use]
pub fn cert_path(root: &Path, target: &CertTarget<'_>) -> PathBuf {
    root.join(target.domain).join(target.file.file_name())
}

/// Read the certificate file for `target` in full.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file doesn't exist.
///
/// Returns [`Error::CertRead`] for any other I/O failure. The failure is logged with the path;
/// callers should not pass the detail on to clients.
pub async fn serve(
    root: &Path,
    target: &CertTarget<'_>,
    client: IpAddr,
) -> Result<Vec<u8>, Error> {
    let path = cert_path(root, target);
    match tokio::fs::read(&path).await {
        Ok(data) => {
            tracing::info!("served {} to {client}", path.display());
            Ok(data)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} requested by {client} does not exist", path.display());
            Err(Error::NotFound)
        }
        Err(err) => {
            tracing::error!("failed to read {}: {err}", path.display());
            Err(Error::CertRead { path, source: err })
        }
    }
}
