use crate::error::Error;
use crate::txt_writer::TxtWriter;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Records = HashMap<String, VecDeque<String>>;

/// Keeps the two most recent values written for each `key.domain` name.
#[derive(Default, Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct InMemoryTxtWriter {
    txt_records: Mutex<Records>,
}

impl InMemoryTxtWriter {
    /// Values written for `key.domain`, most recent first.
    #[must_use]
    pub fn get_txt(&self, domain: &str, key: &str) -> VecDeque<String> {
        self.records()
            .get(&record_name(domain, key))
            .map_or(VecDeque::default(), Clone::clone)
    }

    // Every critical section is a plain map update, so a poisoned map is still consistent.
    fn records(&self) -> MutexGuard<'_, Records> {
        self.txt_records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn record_name(domain: &str, key: &str) -> String {
    format!("{key}.{domain}").to_ascii_lowercase()
}

#[async_trait::async_trait]
impl TxtWriter for InMemoryTxtWriter {
    async fn set_txt(&self, domain: &str, key: &str, value: &str) -> Result<(), Error> {
        {
            let mut records = self.records();
            let e = records.entry(record_name(domain, key)).or_default();
            e.push_front(value.to_string());
            e.truncate(2);
        }
        tracing::debug!("stored TXT \"{key}.{domain}\" in memory");
        Ok(())
    }
}
