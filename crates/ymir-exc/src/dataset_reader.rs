use crate::env::EnvConfig;
use crate::error::{ExecutorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetType {
    Training,
    Validation,
    /// Unlabelled assets for mining or inference.
    Candidate,
}

/// One line of an index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetItem {
    pub asset_path: PathBuf,
    pub annotation_path: Option<PathBuf>,
}

fn index_file(env: &EnvConfig, dataset_type: DatasetType) -> Result<&Path> {
    let (field, path) = match dataset_type {
        DatasetType::Training => ("training_index_file", &env.input.training_index_file),
        DatasetType::Validation => ("val_index_file", &env.input.val_index_file),
        DatasetType::Candidate => ("candidate_index_file", &env.input.candidate_index_file),
    };
    if path.as_os_str().is_empty() {
        return Err(ExecutorError::MissingField(format!("input.{field}")));
    }
    Ok(path.as_path())
}

/// Items listed in the index file for `dataset_type`.
///
/// Lines are `asset\tannotation` or a bare `asset`; blank lines are skipped.
pub fn item_paths(env: &EnvConfig, dataset_type: DatasetType) -> Result<Vec<DatasetItem>> {
    let path = index_file(env, dataset_type)?;
    let contents = std::fs::read_to_string(path).map_err(|e| ExecutorError::io(path, e))?;

    let items: Vec<DatasetItem> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.split('\t');
            let asset_path = PathBuf::from(parts.next().unwrap_or_default());
            let annotation_path = parts.next().filter(|a| !a.is_empty()).map(PathBuf::from);
            DatasetItem { asset_path, annotation_path }
        })
        .collect();

    debug!(?dataset_type, count = items.len(), "read index {}", path.display());
    Ok(items)
}

pub fn items_count(env: &EnvConfig, dataset_type: DatasetType) -> Result<usize> {
    Ok(item_paths(env, dataset_type)?.len())
}
