use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use shapeloop_core::{PaintError, PaintSink};

/// Paints by overwriting a file with the latest markup.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PaintSink for FileSink {
    fn set_content(&self, markup: &str) -> Result<(), PaintError> {
        let target = self.path.display().to_string();
        fs::write(&self.path, markup).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PaintError::TargetMissing { target },
            _ => PaintError::Write {
                target,
                message: err.to_string(),
            },
        })
    }
}

/// Paints by printing each markup string on its own line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl PaintSink for StdoutSink {
    fn set_content(&self, markup: &str) -> Result<(), PaintError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{markup}")
            .and_then(|()| stdout.flush())
            .map_err(|err| PaintError::Write {
                target: "stdout".to_string(),
                message: err.to_string(),
            })
    }
}
