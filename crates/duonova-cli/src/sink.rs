//! File-backed result sink.

use duonova_domain::{ProcessingOutcome, RequestId, ResultSink};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes each outcome to `<dir>/<correlation id>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    /// Create a sink, creating the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an outcome with this id is written to.
    pub fn path_for(&self, correlation_id: &RequestId) -> PathBuf {
        self.dir.join(format!("{}.json", correlation_id))
    }
}

impl ResultSink for JsonDirSink {
    type Error = io::Error;

    fn publish(&self, correlation_id: &RequestId, outcome: &ProcessingOutcome) -> Result<(), Self::Error> {
        let path = self.path_for(correlation_id);
        let json = serde_json::to_string_pretty(outcome)?;
        fs::write(&path, json)?;
        debug!("Wrote outcome to {}", path.display());
        Ok(())
    }
}
