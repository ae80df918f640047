use crate::error::{ExecutorError, Result};
use crate::settings;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment descriptor written by the platform before the executor starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    pub task_id: String,
    /// Platform contract version; empty on platforms that predate versioning.
    #[serde(default)]
    pub protocol_version: String,
    #[serde(default)]
    pub run_training: bool,
    #[serde(default)]
    pub run_mining: bool,
    #[serde(default)]
    pub run_infer: bool,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub root_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub annotations_dir: PathBuf,
    pub models_dir: PathBuf,
    /// Empty when the task has no training set.
    pub training_index_file: PathBuf,
    pub val_index_file: PathBuf,
    pub candidate_index_file: PathBuf,
    /// Executor hyper-parameters chosen by the user.
    pub config_file: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("/in"),
            assets_dir: PathBuf::from("/in/assets"),
            annotations_dir: PathBuf::from("/in/annotations"),
            models_dir: PathBuf::from("/in/models"),
            training_index_file: PathBuf::new(),
            val_index_file: PathBuf::new(),
            candidate_index_file: PathBuf::new(),
            config_file: PathBuf::from("/in/config.yaml"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root_dir: PathBuf,
    pub models_dir: PathBuf,
    pub tensorboard_dir: PathBuf,
    pub training_result_file: PathBuf,
    pub mining_result_file: PathBuf,
    pub infer_result_file: PathBuf,
    pub monitor_file: PathBuf,
    pub executor_log_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("/out"),
            models_dir: PathBuf::from("/out/models"),
            tensorboard_dir: PathBuf::from("/out/tensorboard"),
            training_result_file: PathBuf::from("/out/models/result.yaml"),
            mining_result_file: PathBuf::from("/out/result.tsv"),
            infer_result_file: PathBuf::from("/out/infer-result.json"),
            monitor_file: PathBuf::from("/out/monitor.txt"),
            executor_log_file: PathBuf::from("/out/ymir-executor-out.log"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Training,
    Mining,
    Infer,
}

impl EnvConfig {
    /// Load the descriptor from [`settings::env_file_path`].
    pub fn load() -> Result<Self> {
        Self::load_from(settings::env_file_path())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ExecutorError::io(path, e))?;
        let env: Self = serde_yaml::from_str(&contents).map_err(|e| ExecutorError::yaml(path, e))?;
        env.validate()?;
        debug!(task_id = %env.task_id, protocol_version = %env.protocol_version, "loaded env config from {}", path.display());
        Ok(env)
    }

    pub fn validate(&self) -> Result<()> {
        if self.task_id.trim().is_empty() {
            return Err(ExecutorError::MissingField("task_id".to_string()));
        }
        Ok(())
    }

    /// The task this process was started for. Training wins when several flags are set.
    #[must_use]
    pub fn task_type(&self) -> Option<TaskType> {
        if self.run_training {
            Some(TaskType::Training)
        } else if self.run_mining {
            Some(TaskType::Mining)
        } else if self.run_infer {
            Some(TaskType::Infer)
        } else {
            None
        }
    }
}

static CURRENT_ENV: OnceCell<EnvConfig> = OnceCell::new();

/// Process-wide environment, read on first use and never reloaded.
pub fn get_current_env() -> Result<&'static EnvConfig> {
    CURRENT_ENV.get_or_try_init(EnvConfig::load)
}

/// Read the executor hyper-parameter file named by `input.config_file`.
///
/// A missing file yields an empty mapping; an unreadable or malformed one is an error.
pub fn get_executor_config(env: &EnvConfig) -> Result<serde_yaml::Mapping> {
    let path = env.input.config_file.as_path();
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("executor config {} not found, using empty config", path.display());
            return Ok(serde_yaml::Mapping::new());
        }
        Err(e) => return Err(ExecutorError::io(path, e)),
    };

    let value: serde_yaml::Value =
        serde_yaml::from_str(&contents).map_err(|e| ExecutorError::yaml(path, e))?;
    match value {
        serde_yaml::Value::Mapping(m) => Ok(m),
        serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
        _ => Err(ExecutorError::InvalidConfig(format!(
            "executor config {} is not a mapping",
            path.display()
        ))),
    }
}
