//! Mapping of per-stage completion onto overall job progress.
//!
//! A job runs three stages in order. Each stage owns a fixed fraction of the
//! `[0, 1]` progress range, so a stage-local completion `p` becomes
//! `base(stage) + p * weight(stage)`. Jobs split into several sub-tasks further
//! confine that value to the sub-task's slice of the range.

use crate::error::{ExecutorError, Result};
use crate::monitor::TaskState;
use crate::settings;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YmirStage {
    /// Dataset conversion and setup.
    Preprocess,
    /// Training, mining or inference proper.
    Task,
    /// Model export and result writing.
    Postprocess,
}

impl YmirStage {
    pub const ALL: [Self; 3] = [Self::Preprocess, Self::Task, Self::Postprocess];

    const fn index(self) -> usize {
        match self {
            Self::Preprocess => 0,
            Self::Task => 1,
            Self::Postprocess => 2,
        }
    }
}

impl FromStr for YmirStage {
    type Err = ExecutorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preprocess" => Ok(Self::Preprocess),
            "task" => Ok(Self::Task),
            "postprocess" => Ok(Self::Postprocess),
            other => Err(ExecutorError::InvalidProgress(format!("unknown stage: {other}"))),
        }
    }
}

/// Sub-task position for jobs that run several tasks back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSlice {
    pub task_idx: usize,
    pub task_num: usize,
}

impl TaskSlice {
    pub fn new(task_idx: usize, task_num: usize) -> Result<Self> {
        if task_num == 0 {
            return Err(ExecutorError::InvalidProgress("task_num must be >= 1".to_string()));
        }
        if task_idx >= task_num {
            return Err(ExecutorError::InvalidProgress(format!(
                "task_idx {task_idx} out of range for task_num {task_num}"
            )));
        }
        Ok(Self { task_idx, task_num })
    }

    /// `[idx/num, (idx+1)/num]`
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        let num = self.task_num as f64;
        (self.task_idx as f64 / num, (self.task_idx + 1) as f64 / num)
    }
}

/// Fractions of the progress range owned by preprocess, task and postprocess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YmirStageWeight {
    weights: [f64; 3],
}

pub type StageWeights = YmirStageWeight;

impl Default for YmirStageWeight {
    fn default() -> Self {
        Self { weights: [0.1, 0.8, 0.1] }
    }
}

impl YmirStageWeight {
    pub fn new(weights: [f64; 3]) -> Result<Self> {
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ExecutorError::InvalidWeights(format!(
                "weights must be finite and non-negative, got {weights:?}"
            )));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ExecutorError::InvalidWeights(format!(
                "weights must sum to 1, got {sum} from {weights:?}"
            )));
        }
        Ok(Self { weights })
    }

    /// Weights from `YMIR_STAGE_WEIGHTS`, or the defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(settings::STAGE_WEIGHTS_VAR) {
            Ok(raw) if !raw.trim().is_empty() => raw.parse(),
            _ => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn weights(&self) -> [f64; 3] {
        self.weights
    }

    #[must_use]
    pub fn weight(&self, stage: YmirStage) -> f64 {
        self.weights[stage.index()]
    }

    /// Cumulative weight of every stage before `stage`.
    #[must_use]
    pub fn base(&self, stage: YmirStage) -> f64 {
        self.weights[..stage.index()].iter().sum()
    }

    /// Overall progress for stage-local completion `p`, optionally confined to a sub-task.
    pub fn process(&self, stage: YmirStage, p: f64, slice: Option<TaskSlice>) -> Result<f64> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ExecutorError::InvalidProgress(format!("p not in [0, 1], p={p}")));
        }

        let x = self.base(stage) + p * self.weight(stage);
        match slice {
            None => Ok(x.clamp(0.0, 1.0)),
            Some(slice) => {
                let (lo, hi) = slice.bounds();
                let scaled = (slice.task_idx as f64 + x) / slice.task_num as f64;
                Ok(scaled.clamp(lo, hi))
            }
        }
    }
}

impl FromStr for YmirStageWeight {
    type Err = ExecutorError;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|e| {
                    ExecutorError::InvalidWeights(format!("cannot parse '{}': {e}", part.trim()))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let weights: [f64; 3] = parts.try_into().map_err(|parts: Vec<f64>| {
            ExecutorError::InvalidWeights(format!("expected 3 weights, got {}", parts.len()))
        })?;
        Self::new(weights)
    }
}

/// Overall progress for a single-task job, using weights from the environment.
pub fn get_ymir_process(stage: YmirStage, p: f64) -> Result<f64> {
    YmirStageWeight::from_env()?.process(stage, p, None)
}

/// Overall progress for sub-task `task_idx` of `task_num`.
pub fn get_ymir_process_for_task(
    stage: YmirStage,
    p: f64,
    task_idx: usize,
    task_num: usize,
) -> Result<f64> {
    let slice = TaskSlice::new(task_idx, task_num)?;
    YmirStageWeight::from_env()?.process(stage, p, Some(slice))
}

/// Destination for progress reports.
pub trait ProgressSink {
    fn report(&self, percent: f64, state: TaskState) -> Result<()>;
}

/// Sink that only logs, for runs outside the platform.
#[derive(Debug, Default)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn report(&self, percent: f64, state: TaskState) -> Result<()> {
        info!(state = ?state, "progress {:.2}%", percent * 100.0);
        Ok(())
    }
}
