//! YMIR executor helpers
//!
//! Glue between a containerized training, mining or inference job and the
//! platform that launched it:
//! - Loading the environment descriptor (`EnvConfig`) and executor config
//! - Weighting stage-local progress into job progress (`get_ymir_process`)
//! - Reporting progress through the monitor file
//! - Writing training, mining and infer results in the platform's schema

pub mod config;
pub mod dataset_reader;
pub mod env;
pub mod error;
pub mod layout;
pub mod monitor;
pub mod progress;
pub mod result_writer;
pub mod settings;

pub use config::{get_bool, get_merged_config, MergedConfig};
pub use dataset_reader::{item_paths, items_count, DatasetItem, DatasetType};
pub use env::{get_current_env, get_executor_config, EnvConfig, InputConfig, OutputConfig, TaskType};
pub use error::{ExecutorError, Result};
pub use layout::OutputLayout;
pub use monitor::{
    write_monitor_logger, write_monitor_process_with_weights, write_monitor_state,
    write_ymir_monitor_process, MonitorFileSink, TaskState,
};
pub use progress::{
    get_ymir_process, get_ymir_process_for_task, ProgressSink, StageWeights, TaskSlice,
    TracingProgressSink, YmirStage, YmirStageWeight,
};
pub use result_writer::{
    multiple_model_stages_supportable, read_training_result, write_infer_result, write_mining_result,
    write_model_stage, write_training_result, write_ymir_training_result, Annotation, BoundingBox,
    EvaluationResult, LegacyTrainingResult, ModelStage, MultiStageResult, TrainingResultFile,
};
