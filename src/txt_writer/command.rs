//! A [`TxtWriter`][super::TxtWriter] that shells out to an external program.
use crate::error::Error;
use crate::txt_writer::TxtWriter;
use std::path::PathBuf;
use tokio::process::Command;

/// Runs `<program> set-txt --domain <domain> --key <key> --value <value>` for every update.
///
/// The child is killed if the update is abandoned, e.g. when the API request times out.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct CommandTxtWriter {
    program: PathBuf,
}

impl CommandTxtWriter {
    #[must_use]
    pub fn new(program: PathBuf) -> Self {
        CommandTxtWriter { program }
    }
}

#[async_trait::async_trait]
impl TxtWriter for CommandTxtWriter {
    async fn set_txt(&self, domain: &str, key: &str, value: &str) -> Result<(), Error> {
        let output = Command::new(&self.program)
            .args(["set-txt", "--domain", domain, "--key", key, "--value", value])
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::TxtWriter(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                combined.trim()
            )));
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn successful_command() {
        let writer = CommandTxtWriter::new(PathBuf::from("true"));
        writer
            .set_txt("example.org", "_acme-challenge", "value")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failing_command_is_an_error() {
        let writer = CommandTxtWriter::new(PathBuf::from("false"));
        let res = writer.set_txt("example.org", "_acme-challenge", "value").await;
        assert!(matches!(res, Err(Error::TxtWriter(_))));
    }

    #[tokio::test]
    async fn missing_program_is_an_io_error() {
        let writer = CommandTxtWriter::new(PathBuf::from("/nonexistent/txt-writer"));
        let res = writer.set_txt("example.org", "_acme-challenge", "value").await;
        assert!(matches!(res, Err(Error::IO(_))));
    }
}
