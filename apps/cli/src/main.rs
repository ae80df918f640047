//! ymir-exc CLI - shell access to the YMIR executor helpers
//!
//! Lets executors written as shell scripts read their environment, report
//! progress and record training results without linking the library.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use ymir_exc::{EnvConfig, YmirStage};

#[derive(Parser, Debug)]
#[command(name = "ymir-exc", author, version, about = "YMIR executor helpers")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Environment descriptor (overrides YMIR_ENV_FILE and /in/env.yaml)
    #[arg(short = 'e', long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the loaded environment descriptor as YAML
    Env,

    /// Compute overall progress for a stage
    ///
    /// Prints the weighted progress; with --write it is also recorded in the
    /// monitor file.
    Progress {
        /// Stage (preprocess, task, postprocess)
        #[arg(long)]
        stage: YmirStage,

        /// Completion of the stage in [0, 1]
        #[arg(long)]
        p: f64,

        /// Sub-task index, requires --task-num
        #[arg(long, requires = "task_num")]
        task_idx: Option<usize>,

        /// Number of sub-tasks
        #[arg(long)]
        task_num: Option<usize>,

        /// Record the value in the monitor file
        #[arg(long)]
        write: bool,
    },

    /// Record a trained model in the training result file
    TrainingResult {
        /// Stage name, e.g. epoch_10
        #[arg(long)]
        id: String,

        /// mAP of the model
        #[arg(long)]
        map: f64,

        /// Extra metric as NAME=VALUE (repeatable)
        #[arg(long = "metric", value_name = "NAME=VALUE")]
        metrics: Vec<String>,

        /// Model files; defaults to everything in the models directory
        files: Vec<String>,
    },

    /// Read a boolean executor parameter
    GetBool {
        key: String,

        /// Value used when the key is absent
        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        default: bool,
    },
}

fn load_env(env_file: Option<PathBuf>) -> anyhow::Result<EnvConfig> {
    match env_file {
        Some(path) => EnvConfig::load_from(&path)
            .with_context(|| format!("loading environment from {}", path.display())),
        None => EnvConfig::load().context("loading environment"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries command output; logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let env = load_env(args.env_file)?;

    match args.command {
        Command::Env => commands::env::execute(&env),
        Command::Progress { stage, p, task_idx, task_num, write } => {
            commands::progress::execute(&env, stage, p, task_idx, task_num, write)
        }
        Command::TrainingResult { id, map, metrics, files } => {
            commands::training_result::execute(env, &id, map, &metrics, &files)
        }
        Command::GetBool { key, default } => commands::param::execute(env, &key, default),
    }
}
