use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use image::DynamicImage;

use super::ImageSource;
use crate::error::{Error, Result};

/// Live capture through an external program (e.g. `fswebcam`) that writes a
/// single image file.
///
/// Each capture waits `settle` first so the camera exposure can stabilize,
/// then runs the program and decodes `output`.
#[derive(Debug, Clone)]
pub struct CommandImageSource {
    command: Vec<String>,
    output: PathBuf,
    settle: Duration,
}

impl CommandImageSource {
    /// `command[0]` is the program, the rest its arguments.
    pub fn new(command: Vec<String>, output: PathBuf, settle: Duration) -> Self {
        Self {
            command,
            output,
            settle,
        }
    }
}

impl ImageSource for CommandImageSource {
    fn capture(&mut self) -> Result<DynamicImage> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| Error::capture("empty capture command"))?;
        std::thread::sleep(self.settle);

        tracing::debug!(program = %program, "running capture command");
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| Error::capture(format!("failed to run {program}: {e}")))?;
        if !status.success() {
            return Err(Error::capture(format!("{program} exited with {status}")));
        }
        self.read_file(&self.output)
    }
}
