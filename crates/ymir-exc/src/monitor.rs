use crate::env::EnvConfig;
use crate::error::{ExecutorError, Result};
use crate::progress::{ProgressSink, TaskSlice, YmirStage, YmirStageWeight};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Task state codes understood by the platform's monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Running,
    Done,
    Error,
}

impl TaskState {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::Running => 2,
            Self::Done => 3,
            Self::Error => 4,
        }
    }
}

/// Writes the single-line monitor record the platform polls.
#[derive(Debug, Clone)]
pub struct MonitorFileSink {
    task_id: String,
    path: PathBuf,
}

impl MonitorFileSink {
    #[must_use]
    pub fn new(task_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { task_id: task_id.into(), path: path.into() }
    }

    #[must_use]
    pub fn for_env(env: &EnvConfig) -> Self {
        Self::new(env.task_id.clone(), env.output.monitor_file.clone())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressSink for MonitorFileSink {
    fn report(&self, percent: f64, state: TaskState) -> Result<()> {
        if !percent.is_finite() || !(0.0..=1.0).contains(&percent) {
            return Err(ExecutorError::InvalidProgress(format!(
                "percent not in [0, 1], percent={percent}"
            )));
        }

        let timestamp = Utc::now().timestamp_micros() as f64 / 1_000_000.0;
        let line = format!("{}\t{timestamp:.6}\t{percent:.2}\t{}\n", self.task_id, state.code());
        std::fs::write(&self.path, line).map_err(|e| ExecutorError::io(&self.path, e))?;
        debug!(state = ?state, "monitor {:.2} -> {}", percent, self.path.display());
        Ok(())
    }
}

/// Record `percent` as running progress.
pub fn write_monitor_logger(env: &EnvConfig, percent: f64) -> Result<()> {
    write_monitor_state(env, percent, TaskState::Running)
}

pub fn write_monitor_state(env: &EnvConfig, percent: f64, state: TaskState) -> Result<()> {
    MonitorFileSink::for_env(env).report(percent, state)
}

/// Compute stage progress with weights from `YMIR_STAGE_WEIGHTS` and record it.
pub fn write_ymir_monitor_process(
    env: &EnvConfig,
    stage: YmirStage,
    p: f64,
    slice: Option<TaskSlice>,
) -> Result<f64> {
    write_monitor_process_with_weights(env, &YmirStageWeight::from_env()?, stage, p, slice)
}

/// Compute stage progress and record it; returns the recorded value.
pub fn write_monitor_process_with_weights(
    env: &EnvConfig,
    weights: &YmirStageWeight,
    stage: YmirStage,
    p: f64,
    slice: Option<TaskSlice>,
) -> Result<f64> {
    let percent = weights.process(stage, p, slice)?;
    write_monitor_logger(env, percent)?;
    Ok(percent)
}
