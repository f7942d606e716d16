use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use reint_core::errors::{ErrorInfo, ReintError};
use reint_core::serde_io;
use reint_core::BenchmarkRegistry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::config::PipelineConfig;

fn io_error(code: &str, path: &Path, err: impl ToString) -> ReintError {
    ReintError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

fn with_path(path: &Path) -> impl FnOnce(ReintError) -> ReintError + '_ {
    move |err| match err {
        ReintError::MalformedInput(info) => {
            ReintError::MalformedInput(info.with_context("path", path.display().to_string()))
        }
        other => other,
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ReintError> {
    fs::read(path).map_err(|err| io_error("read", path, err))
}

/// Reads and decodes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReintError> {
    serde_io::from_json_slice(&read_bytes(path)?).map_err(with_path(path))
}

/// Built-in registry, extended by `path` when given.
pub fn load_registry(path: Option<&Path>) -> Result<BenchmarkRegistry, ReintError> {
    match path {
        Some(path) => BenchmarkRegistry::from_yaml_slice(&read_bytes(path)?).map_err(with_path(path)),
        None => Ok(BenchmarkRegistry::builtin()),
    }
}

/// Pipeline configuration from `path`, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig, ReintError> {
    match path {
        Some(path) => PipelineConfig::from_yaml_slice(&read_bytes(path)?).map_err(with_path(path)),
        None => Ok(PipelineConfig::default()),
    }
}

/// Artefacts staged as temporary files next to their destinations.
///
/// Nothing becomes visible until [`OutputSet::commit`], which publishes every
/// file or none of them. Dropping an uncommitted set removes the temporaries.
#[derive(Default)]
pub struct OutputSet {
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl OutputSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `bytes` to a temporary file in the directory of `path`.
    pub fn stage_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<(), ReintError> {
        if path.is_dir() {
            return Err(io_error(
                "target-is-directory",
                path,
                "output path is an existing directory",
            ));
        }
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|err| io_error("create-dir", dir, err))?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|err| io_error("tempfile", dir, err))?;
        tmp.write_all(bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|err| io_error("write", path, err))?;
        self.staged.push((tmp, path.to_path_buf()));
        Ok(())
    }

    /// Stages pretty JSON with sorted keys.
    pub fn stage_json<T: Serialize>(&mut self, path: &Path, value: &T) -> Result<(), ReintError> {
        self.stage_bytes(path, &serde_io::to_pretty_json_bytes(value)?)
    }

    /// Renames every staged file into place.
    ///
    /// If one rename fails the files already published by this call are removed.
    pub fn commit(self) -> Result<(), ReintError> {
        let mut published: Vec<PathBuf> = Vec::with_capacity(self.staged.len());
        for (tmp, path) in self.staged {
            if let Err(err) = tmp.persist(&path) {
                for done in &published {
                    if let Err(remove_err) = fs::remove_file(done) {
                        tracing::warn!(path = %done.display(), error = %remove_err, "rollback failed");
                    }
                }
                return Err(io_error("persist", &path, err.error));
            }
            tracing::debug!(path = %path.display(), "wrote artefact");
            published.push(path);
        }
        Ok(())
    }
}

/// Current UTC time in RFC 3339 form.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
