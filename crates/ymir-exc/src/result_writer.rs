//! Result files handed back to the platform.
//!
//! Training results come in two shapes. Platforms speaking protocol 1.0.0 or
//! later accept several named model stages; older ones expect a single flat
//! record. Every write merges with what is already on disk.

use crate::config::MergedConfig;
use crate::env::EnvConfig;
use crate::error::{ExecutorError, Result};
use crate::layout::OutputLayout;
use crate::settings;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Metric name to value, e.g. `{"mAP": 0.61}`.
pub type EvaluationResult = BTreeMap<String, f64>;

pub const MAP_KEY: &str = "mAP";

/// Top-level keys of a training result that extra metrics may not shadow.
const RESERVED_KEYS: [&str; 3] = ["model", "map", "model_stages"];

static STAGE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{1,50}$").expect("valid stage name pattern"));

/// One named checkpoint of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStage {
    #[serde(default)]
    pub stage_name: String,
    pub files: Vec<String>,
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(rename = "mAP")]
    pub map: f64,
    #[serde(default)]
    pub evaluation_result: EvaluationResult,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attachments: BTreeMap<String, Vec<String>>,
}

impl ModelStage {
    pub fn new(
        stage_name: impl Into<String>,
        files: Vec<String>,
        evaluation_result: EvaluationResult,
    ) -> Result<Self> {
        let stage_name = stage_name.into();
        if !STAGE_NAME_RE.is_match(&stage_name) {
            return Err(ExecutorError::InvalidResult(format!(
                "invalid stage name '{stage_name}': expected 1-50 of [A-Za-z0-9_]"
            )));
        }
        if files.is_empty() {
            return Err(ExecutorError::InvalidResult(format!(
                "stage '{stage_name}' has no model files"
            )));
        }
        let map = required_map(&evaluation_result)?;

        Ok(Self {
            stage_name,
            files,
            timestamp: Utc::now().timestamp(),
            map,
            evaluation_result,
            attachments: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: BTreeMap<String, Vec<String>>) -> Self {
        self.attachments = attachments;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiStageResult {
    /// Oldest first; serialized as a mapping keyed by stage name.
    #[serde(with = "stage_map")]
    pub model_stages: Vec<ModelStage>,
    pub best_stage_name: String,
    pub map: f64,
}

impl MultiStageResult {
    fn empty() -> Self {
        Self { model_stages: Vec::new(), best_stage_name: String::new(), map: 0.0 }
    }

    #[must_use]
    pub fn stage(&self, name: &str) -> Option<&ModelStage> {
        self.model_stages.iter().find(|s| s.stage_name == name)
    }

    fn upsert(&mut self, stage: ModelStage) {
        self.model_stages.retain(|s| s.stage_name != stage.stage_name);
        self.model_stages.push(stage);

        while self.model_stages.len() > settings::MAX_MODEL_STAGES {
            let evicted = self.model_stages.remove(0);
            debug!("evicting oldest model stage {}", evicted.stage_name);
        }

        // Ties go to the most recent stage.
        if let Some(best) = self
            .model_stages
            .iter()
            .fold(None::<&ModelStage>, |best, s| match best {
                Some(b) if b.map > s.map => Some(b),
                _ => Some(s),
            })
        {
            self.best_stage_name = best.stage_name.clone();
            self.map = best.map;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyTrainingResult {
    #[serde(default)]
    pub model: Vec<String>,
    #[serde(default)]
    pub map: f64,
    /// Additional metrics written next to `map`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A training result file in either shape.
///
/// Files with a `model_stages` key are always read as multi-stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrainingResultFile {
    MultiStage(MultiStageResult),
    Legacy(LegacyTrainingResult),
}

/// Whether the platform accepts `model_stages` in the training result.
#[must_use]
pub fn multiple_model_stages_supportable(env: &EnvConfig) -> bool {
    let Some(version) = parse_protocol_version(&env.protocol_version) else {
        return false;
    };
    let Ok(required) = Version::parse(settings::MULTI_STAGE_PROTOCOL_VERSION) else {
        return false;
    };
    version >= required
}

/// Accepts `1`, `1.0`, `1.0.0` and a leading `v`.
fn parse_protocol_version(raw: &str) -> Option<Version> {
    let raw = raw.trim().trim_start_matches(['v', 'V']);
    if raw.is_empty() {
        return None;
    }
    let padded = match raw.matches('.').count() {
        0 => format!("{raw}.0.0"),
        1 => format!("{raw}.0"),
        _ => raw.to_string(),
    };
    Version::parse(&padded).ok()
}

fn required_map(evaluation_result: &EvaluationResult) -> Result<f64> {
    match evaluation_result.get(MAP_KEY) {
        Some(map) if map.is_finite() => Ok(*map),
        Some(map) => Err(ExecutorError::InvalidResult(format!("{MAP_KEY} is not finite: {map}"))),
        None => Err(ExecutorError::MissingField(format!("evaluation_result.{MAP_KEY}"))),
    }
}

pub fn read_training_result(path: &Path) -> Result<Option<TrainingResultFile>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ExecutorError::io(path, e)),
    };
    if contents.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_yaml::Value =
        serde_yaml::from_str(&contents).map_err(|e| ExecutorError::yaml(path, e))?;
    let result = if value.get("model_stages").is_some() {
        TrainingResultFile::MultiStage(
            serde_yaml::from_value(value).map_err(|e| ExecutorError::yaml(path, e))?,
        )
    } else {
        TrainingResultFile::Legacy(
            serde_yaml::from_value(value).map_err(|e| ExecutorError::yaml(path, e))?,
        )
    };
    Ok(Some(result))
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExecutorError::io(parent, e))?;
    }
    let contents = serde_yaml::to_string(value).map_err(|e| ExecutorError::yaml(path, e))?;
    std::fs::write(path, contents).map_err(|e| ExecutorError::io(path, e))
}

/// Add or replace a model stage in the multi-stage training result.
pub fn write_model_stage(env: &EnvConfig, stage: ModelStage) -> Result<MultiStageResult> {
    let path = env.output.training_result_file.as_path();
    let mut result = match read_training_result(path)? {
        Some(TrainingResultFile::MultiStage(existing)) => existing,
        Some(TrainingResultFile::Legacy(_)) => {
            warn!("replacing legacy training result at {} with model stages", path.display());
            MultiStageResult::empty()
        }
        None => MultiStageResult::empty(),
    };

    info!(stage = %stage.stage_name, map = stage.map, "writing model stage");
    result.upsert(stage);
    write_yaml(path, &result)?;
    Ok(result)
}

/// Merge a single-model result into the legacy training result.
///
/// `model` accumulates the union of files, `map` keeps the best value seen.
pub fn write_training_result(
    env: &EnvConfig,
    files: &[String],
    map: f64,
    extra: BTreeMap<String, serde_yaml::Value>,
) -> Result<LegacyTrainingResult> {
    if let Some(key) = extra.keys().find(|k| RESERVED_KEYS.contains(&k.as_str())) {
        return Err(ExecutorError::InvalidResult(format!(
            "metric '{key}' clashes with a reserved training result key"
        )));
    }

    let path = env.output.training_result_file.as_path();
    let mut result = match read_training_result(path)? {
        Some(TrainingResultFile::Legacy(existing)) => existing,
        Some(TrainingResultFile::MultiStage(_)) => {
            warn!("replacing model stages at {} with legacy training result", path.display());
            LegacyTrainingResult::default()
        }
        None => LegacyTrainingResult { map, ..LegacyTrainingResult::default() },
    };

    for file in files {
        if !result.model.contains(file) {
            result.model.push(file.clone());
        }
    }
    result.map = result.map.max(map);
    result.extra.extend(extra);

    info!(map = result.map, models = result.model.len(), "writing training result");
    write_yaml(path, &result)?;
    Ok(result)
}

/// Record a trained model in whichever shape the platform supports.
///
/// Empty `files` stands for every file currently in the models directory.
pub fn write_ymir_training_result(
    cfg: &MergedConfig,
    evaluation_result: &EvaluationResult,
    files: &[String],
    id: &str,
) -> Result<TrainingResultFile> {
    let env = &cfg.ymir;
    let layout = OutputLayout::new(&env.output);
    let files = if files.is_empty() {
        layout.model_files()?
    } else {
        files
            .iter()
            .map(|f| layout.relative_model_name(f))
            .collect::<Result<Vec<_>>>()?
    };

    if multiple_model_stages_supportable(env) {
        let stage = ModelStage::new(id, files, evaluation_result.clone())?;
        Ok(TrainingResultFile::MultiStage(write_model_stage(env, stage)?))
    } else {
        let map = required_map(evaluation_result)?;
        let extra = evaluation_result
            .iter()
            .filter(|(k, _)| k.as_str() != MAP_KEY)
            .map(|(k, v)| (k.clone(), serde_yaml::Value::from(*v)))
            .collect();
        Ok(TrainingResultFile::Legacy(write_training_result(env, &files, map, extra)?))
    }
}

/// Write mining scores, highest first, as `asset\tscore` lines.
pub fn write_mining_result(env: &EnvConfig, mut mining_result: Vec<(String, f64)>) -> Result<()> {
    mining_result.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut out = String::new();
    for (asset, score) in &mining_result {
        out.push_str(&format!("{asset}\t{score}\n"));
    }

    let path = env.output.mining_result_file.as_path();
    std::fs::write(path, out).map_err(|e| ExecutorError::io(path, e))?;
    info!(assets = mining_result.len(), "wrote mining result to {}", path.display());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub class_name: String,
    pub score: f64,
}

/// Write detections keyed by asset file name.
///
/// Asset names must be unique once directories are stripped.
pub fn write_infer_result(
    env: &EnvConfig,
    infer_result: &BTreeMap<String, Vec<Annotation>>,
) -> Result<()> {
    let mut detection = serde_json::Map::new();
    for (asset_path, annotations) in infer_result {
        let name = Path::new(asset_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(asset_path.as_str());
        if detection.contains_key(name) {
            return Err(ExecutorError::InvalidResult(format!(
                "infer result has several assets named '{name}', last at {asset_path}"
            )));
        }
        detection.insert(name.to_string(), serde_json::json!({ "annotations": annotations }));
    }

    let body = serde_json::to_string(&serde_json::json!({ "detection": detection }))?;
    let path = env.output.infer_result_file.as_path();
    std::fs::write(path, body).map_err(|e| ExecutorError::io(path, e))?;
    info!(assets = infer_result.len(), "wrote infer result to {}", path.display());
    Ok(())
}

mod stage_map {
    use super::ModelStage;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(stages: &[ModelStage], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(stages.len()))?;
        for stage in stages {
            map.serialize_entry(&stage.stage_name, stage)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ModelStage>, D::Error> {
        struct StageMapVisitor;

        impl<'de> Visitor<'de> for StageMapVisitor {
            type Value = Vec<ModelStage>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of stage name to model stage")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut stages = Vec::new();
                while let Some((name, mut stage)) = access.next_entry::<String, ModelStage>()? {
                    stage.stage_name = name;
                    stages.push(stage);
                }
                Ok(stages)
            }
        }

        deserializer.deserialize_map(StageMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env_in(temp: &TempDir, protocol_version: &str) -> EnvConfig {
        let root = temp.path().join("out");
        let mut env: EnvConfig = serde_yaml::from_str("task_id: task0\nrun_training: true\n").unwrap();
        env.protocol_version = protocol_version.to_string();
        env.input.config_file = temp.path().join("config.yaml");
        env.output.models_dir = root.join("models");
        env.output.tensorboard_dir = root.join("tensorboard");
        env.output.training_result_file = temp.path().join("result.yaml");
        env.output.mining_result_file = root.join("result.tsv");
        env.output.infer_result_file = root.join("infer-result.json");
        env.output.root_dir = root;
        OutputLayout::new(&env.output).ensure_dirs().unwrap();
        env
    }

    fn eval(map: f64) -> EvaluationResult {
        BTreeMap::from([(MAP_KEY.to_string(), map)])
    }

    fn raw_result(env: &EnvConfig) -> serde_yaml::Mapping {
        let contents = std::fs::read_to_string(&env.output.training_result_file).unwrap();
        serde_yaml::from_str(&contents).unwrap()
    }

    #[test]
    fn test_supportable_by_protocol_version() {
        let temp = TempDir::new().unwrap();
        for (version, expected) in [
            ("", false),
            ("0.9.9", false),
            ("1.0.0", true),
            ("1.1", true),
            ("v2", true),
            ("garbage", false),
        ] {
            let env = env_in(&temp, version);
            assert_eq!(multiple_model_stages_supportable(&env), expected, "version {version:?}");
        }
    }

    #[test]
    fn test_model_stage_validation() {
        assert!(ModelStage::new("epoch-1", vec!["a.pth".to_string()], eval(0.1)).is_err());
        assert!(ModelStage::new("", vec!["a.pth".to_string()], eval(0.1)).is_err());
        assert!(ModelStage::new("epoch_1", vec![], eval(0.1)).is_err());
        assert!(matches!(
            ModelStage::new("epoch_1", vec!["a.pth".to_string()], BTreeMap::new()),
            Err(ExecutorError::MissingField(_))
        ));
        assert!(ModelStage::new("epoch_1", vec!["a.pth".to_string()], eval(0.1)).is_ok());
    }

    #[test]
    fn test_multi_stage_writes_accumulate() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "1.0.0");
        let cfg = MergedConfig { param: serde_yaml::Mapping::new(), ymir: env.clone() };
        let layout = OutputLayout::new(&env.output);
        let maps = [0.3, 0.7, 0.5];

        for (i, map) in maps.iter().enumerate() {
            let files = vec![format!("checkpoint_{i}.pth"), format!("config_{i}.json")];
            for f in &files {
                std::fs::write(layout.model_path(f), f).unwrap();
            }
            write_ymir_training_result(&cfg, &eval(*map), &files, &format!("epoch_{i}")).unwrap();

            let raw = raw_result(&env);
            assert!(raw.contains_key("model_stages"));
            assert!(!raw.contains_key("model"));
        }

        let result = match read_training_result(&env.output.training_result_file).unwrap() {
            Some(TrainingResultFile::MultiStage(r)) => r,
            other => panic!("expected multi-stage result, got {other:?}"),
        };
        let names: Vec<_> = result.model_stages.iter().map(|s| s.stage_name.as_str()).collect();
        assert_eq!(names, vec!["epoch_0", "epoch_1", "epoch_2"]);
        assert_eq!(result.best_stage_name, "epoch_1");
        assert!((result.map - 0.7).abs() < 1e-9);
        assert_eq!(result.stage("epoch_2").unwrap().files, vec!["checkpoint_2.pth", "config_2.json"]);

        // Empty file list picks up everything in the models directory.
        write_ymir_training_result(&cfg, &eval(0.0), &[], "last").unwrap();
        let result = match read_training_result(&env.output.training_result_file).unwrap() {
            Some(TrainingResultFile::MultiStage(r)) => r,
            other => panic!("expected multi-stage result, got {other:?}"),
        };
        assert_eq!(result.model_stages.len(), 4);
        assert_eq!(result.stage("last").unwrap().files.len(), 6);
        assert_eq!(result.best_stage_name, "epoch_1");
    }

    #[test]
    fn test_multi_stage_replaces_same_name_and_caps() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "1.0.0");

        for i in 0..settings::MAX_MODEL_STAGES + 2 {
            let stage = ModelStage::new(format!("s{i}"), vec![format!("s{i}.pth")], eval(0.1))
                .unwrap()
                .with_timestamp(1_000 + i as i64);
            write_model_stage(&env, stage).unwrap();
        }
        let stage = ModelStage::new("s5", vec!["s5b.pth".to_string()], eval(0.9)).unwrap();
        let result = write_model_stage(&env, stage).unwrap();

        assert_eq!(result.model_stages.len(), settings::MAX_MODEL_STAGES);
        assert!(result.stage("s0").is_none());
        assert!(result.stage("s1").is_none());
        assert_eq!(result.model_stages.last().unwrap().stage_name, "s5");
        assert_eq!(result.stage("s5").unwrap().files, vec!["s5b.pth"]);
        assert_eq!(result.best_stage_name, "s5");
        assert_eq!(
            result.model_stages.iter().filter(|s| s.stage_name == "s5").count(),
            1
        );
    }

    #[test]
    fn test_legacy_writes_accumulate() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "");
        let cfg = MergedConfig { param: serde_yaml::Mapping::new(), ymir: env.clone() };

        let mut metrics = eval(0.4);
        metrics.insert("mAR".to_string(), 0.2);
        write_ymir_training_result(&cfg, &metrics, &["/out/models/a.pth".to_string()], "epoch_0")
            .unwrap();
        write_ymir_training_result(&cfg, &eval(0.2), &["b.pth".to_string(), "a.pth".to_string()], "epoch_1")
            .unwrap();

        let raw = raw_result(&env);
        assert!(raw.contains_key("model"));
        assert!(raw.contains_key("map"));
        assert!(!raw.contains_key("model_stages"));

        let result = match read_training_result(&env.output.training_result_file).unwrap() {
            Some(TrainingResultFile::Legacy(r)) => r,
            other => panic!("expected legacy result, got {other:?}"),
        };
        assert_eq!(result.model, vec!["a.pth", "b.pth"]);
        assert!((result.map - 0.4).abs() < 1e-9);
        assert_eq!(result.extra.get("mAR").and_then(serde_yaml::Value::as_f64), Some(0.2));
    }

    #[test]
    fn test_legacy_rejects_reserved_metric_names() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "");
        let cfg = MergedConfig { param: serde_yaml::Mapping::new(), ymir: env.clone() };

        for reserved in ["map", "model", "model_stages"] {
            let mut metrics = eval(0.5);
            metrics.insert(reserved.to_string(), 0.3);
            let err = write_ymir_training_result(&cfg, &metrics, &["a.pth".to_string()], "epoch_0")
                .unwrap_err();
            assert!(matches!(err, ExecutorError::InvalidResult(_)), "{reserved}: {err}");
        }
        assert!(!env.output.training_result_file.exists());

        write_ymir_training_result(&cfg, &eval(0.5), &["a.pth".to_string()], "epoch_0").unwrap();
        let result = write_ymir_training_result(&cfg, &eval(0.6), &["b.pth".to_string()], "epoch_1")
            .unwrap();
        match result {
            TrainingResultFile::Legacy(r) => {
                assert_eq!(r.model, vec!["a.pth", "b.pth"]);
                assert!((r.map - 0.6).abs() < 1e-9);
            }
            other => panic!("expected legacy result, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_model_stages_are_not_discarded() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "1.0.0");
        let existing = "model_stages:
  epoch_0:
    stage_name: epoch_0
    files: [epoch_0.pth]
    timestamp: 1660000000.5
    mAP: 0.9
best_stage_name: epoch_0
map: 0.9
";
        std::fs::write(&env.output.training_result_file, existing).unwrap();

        assert!(matches!(
            read_training_result(&env.output.training_result_file),
            Err(ExecutorError::Yaml { .. })
        ));

        let stage = ModelStage::new("epoch_1", vec!["epoch_1.pth".to_string()], eval(0.5)).unwrap();
        assert!(matches!(write_model_stage(&env, stage), Err(ExecutorError::Yaml { .. })));
        assert_eq!(std::fs::read_to_string(&env.output.training_result_file).unwrap(), existing);
    }

    #[test]
    fn test_legacy_requires_map() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "");
        let cfg = MergedConfig { param: serde_yaml::Mapping::new(), ymir: env };
        let err = write_ymir_training_result(&cfg, &BTreeMap::new(), &["a.pth".to_string()], "x")
            .unwrap_err();
        assert!(matches!(err, ExecutorError::MissingField(_)));
    }

    #[test]
    fn test_write_mining_result_sorted() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "1.0.0");
        write_mining_result(
            &env,
            vec![("a.jpg".to_string(), 0.1), ("b.jpg".to_string(), 0.9), ("c.jpg".to_string(), 0.5)],
        )
        .unwrap();

        let contents = std::fs::read_to_string(&env.output.mining_result_file).unwrap();
        assert_eq!(contents, "b.jpg\t0.9\nc.jpg\t0.5\na.jpg\t0.1\n");
    }

    #[test]
    fn test_write_infer_result_keys_by_basename() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "1.0.0");
        let annotation = Annotation {
            bbox: BoundingBox { x: 1, y: 2, w: 30, h: 40 },
            class_name: "person".to_string(),
            score: 0.8,
        };
        let infer = BTreeMap::from([
            ("/in/assets/ab/img1.jpg".to_string(), vec![annotation]),
            ("img2.jpg".to_string(), vec![]),
        ]);
        write_infer_result(&env, &infer).unwrap();

        let contents = std::fs::read_to_string(&env.output.infer_result_file).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let first = &value["detection"]["img1.jpg"]["annotations"][0];
        assert_eq!(first["box"]["w"], 30);
        assert_eq!(first["class_name"], "person");
        assert_eq!(value["detection"]["img2.jpg"]["annotations"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_write_infer_result_rejects_duplicate_basenames() {
        let temp = TempDir::new().unwrap();
        let env = env_in(&temp, "1.0.0");
        let infer = BTreeMap::from([
            ("/in/assets/a/img.jpg".to_string(), vec![]),
            ("/in/assets/b/img.jpg".to_string(), vec![]),
        ]);

        let err = write_infer_result(&env, &infer).unwrap_err();
        assert!(matches!(err, ExecutorError::InvalidResult(_)));
        assert!(err.to_string().contains("img.jpg"));
        assert!(!env.output.infer_result_file.exists());
    }
}
