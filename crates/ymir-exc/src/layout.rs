use crate::env::OutputConfig;
use crate::error::{ExecutorError, Result};
use std::path::{Path, PathBuf};

/// Filesystem layout of the executor's output directory.
///
/// Model files are referenced by name relative to `models_dir`.
#[derive(Debug, Clone)]
pub struct OutputLayout<'a> {
    output: &'a OutputConfig,
}

impl<'a> OutputLayout<'a> {
    #[must_use]
    pub fn new(output: &'a OutputConfig) -> Self {
        Self { output }
    }

    #[must_use]
    pub fn models_dir(&self) -> &Path {
        &self.output.models_dir
    }

    #[must_use]
    pub fn model_path(&self, name: &str) -> PathBuf {
        self.output.models_dir.join(name)
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.output.root_dir, &self.output.models_dir, &self.output.tensorboard_dir] {
            std::fs::create_dir_all(dir).map_err(|e| ExecutorError::io(dir, e))?;
        }
        Ok(())
    }

    /// Regular files currently in `models_dir`, by name, sorted; the training result file is skipped.
    pub fn model_files(&self) -> Result<Vec<String>> {
        let dir = self.models_dir();
        let entries = match std::fs::read_dir(dir) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ExecutorError::io(dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ExecutorError::io(dir, e))?.path();
            if !path.is_file() || path == self.output.training_result_file {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Name under which `path` is recorded in a result file.
    pub fn relative_model_name(&self, path: &str) -> Result<String> {
        Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| ExecutorError::InvalidResult(format!("not a file path: '{path}'")))
    }
}
