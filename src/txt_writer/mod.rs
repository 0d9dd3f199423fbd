//! DNS TXT record writers.
//!
//! The [`/set_txt` API endpoint][crate::api#set_txt-post] hands record updates to a
//! [`TxtWriter`]. How a writer talks to the authoritative DNS provider is up to the writer.
//!
//! Two implementations are provided, [`command::CommandTxtWriter`] and
//! [`memory::InMemoryTxtWriter`]. The former delegates each update to an external program. The
//! latter only keeps the most recent values in memory, which is useful for tests and dry runs.

use crate::error::Error;
use std::sync::Arc;

pub mod command;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use command::CommandTxtWriter;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryTxtWriter;

/// `DynTxtWriter` is a type alias for a [`TxtWriter`] shared between request handlers through an
/// [`Arc`].
#[allow(clippy::module_name_repetitions)]
pub type DynTxtWriter = Arc<dyn TxtWriter + Send + Sync>;

/// An async trait describing something that can publish a TXT record `value` at the name
/// `key.domain`.
///
/// Updates may run concurrently. Implementations that keep state must synchronize it
/// themselves and must not hold a lock across an `.await`.
#[async_trait::async_trait]
pub trait TxtWriter {
    /// Set the TXT record `key` under `domain` to `value`.
    async fn set_txt(&self, domain: &str, key: &str, value: &str) -> Result<(), Error>;
}
