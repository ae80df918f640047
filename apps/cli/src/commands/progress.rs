//! Progress command implementation.

use anyhow::Context;
use ymir_exc::{EnvConfig, MonitorFileSink, ProgressSink, TaskSlice, TaskState, YmirStage, YmirStageWeight};

/// Execute the progress command.
///
/// Weights come from `YMIR_STAGE_WEIGHTS` when set.
pub fn execute(
    env: &EnvConfig,
    stage: YmirStage,
    p: f64,
    task_idx: Option<usize>,
    task_num: Option<usize>,
    write: bool,
) -> anyhow::Result<()> {
    let weights = YmirStageWeight::from_env()?;
    let slice = match (task_idx, task_num) {
        (None, None) => None,
        (idx, Some(num)) => Some(TaskSlice::new(idx.unwrap_or(0), num)?),
        (Some(_), None) => anyhow::bail!("--task-idx requires --task-num"),
    };

    let percent = weights.process(stage, p, slice)?;
    if write {
        let sink = MonitorFileSink::for_env(env);
        sink.report(percent, TaskState::Running)
            .with_context(|| format!("writing monitor file {}", sink.path().display()))?;
    }

    println!("{percent:.6}");
    Ok(())
}
