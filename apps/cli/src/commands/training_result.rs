//! Training result command implementation.

use anyhow::Context;
use ymir_exc::result_writer::MAP_KEY;
use ymir_exc::{
    multiple_model_stages_supportable, write_ymir_training_result, EnvConfig, EvaluationResult,
    MergedConfig, TrainingResultFile,
};

fn parse_metric(raw: &str) -> anyhow::Result<(String, f64)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("metric '{raw}' is not NAME=VALUE"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("metric '{raw}' has a non-numeric value"))?;
    Ok((name.trim().to_string(), value))
}

/// Execute the training-result command.
pub fn execute(
    env: EnvConfig,
    id: &str,
    map: f64,
    metrics: &[String],
    files: &[String],
) -> anyhow::Result<()> {
    let mut evaluation_result = EvaluationResult::new();
    for raw in metrics {
        let (name, value) = parse_metric(raw)?;
        evaluation_result.insert(name, value);
    }
    evaluation_result.insert(MAP_KEY.to_string(), map);

    let multi_stage = multiple_model_stages_supportable(&env);
    let cfg = MergedConfig::load(env)?;
    let result = write_ymir_training_result(&cfg, &evaluation_result, files, id)?;

    match result {
        TrainingResultFile::MultiStage(r) => {
            println!("model_stages={} best_stage_name={} map={}", r.model_stages.len(), r.best_stage_name, r.map);
        }
        TrainingResultFile::Legacy(r) => {
            println!("model={} map={}", r.model.len(), r.map);
        }
    }
    tracing::debug!(multi_stage, "training result written to {}", cfg.ymir.output.training_result_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric() {
        assert_eq!(parse_metric("mAR=0.5").unwrap(), ("mAR".to_string(), 0.5));
        assert!(parse_metric("mAR").is_err());
        assert!(parse_metric("mAR=high").is_err());
    }
}
