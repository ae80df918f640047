//! Executor configuration as seen by training code: user hyper-parameters
//! (`param`) next to the platform environment (`ymir`).

use crate::env::{get_current_env, get_executor_config, EnvConfig};
use crate::error::{ExecutorError, Result};
use serde_yaml::{Mapping, Value};

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub param: Mapping,
    pub ymir: EnvConfig,
}

impl MergedConfig {
    /// Pair `env` with the hyper-parameters it points at.
    pub fn load(env: EnvConfig) -> Result<Self> {
        let param = get_executor_config(&env)?;
        Ok(Self { param, ymir: env })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.param.get(key)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        get_bool(&self.param, key, default)
    }
}

/// Merged config for the current process environment.
pub fn get_merged_config() -> Result<MergedConfig> {
    MergedConfig::load(get_current_env()?.clone())
}

/// Read `key` as a boolean, tolerating the spellings users put in YAML.
///
/// Absent keys and explicit `null` yield `default`.
pub fn get_bool(config: &Mapping, key: &str, default: bool) -> Result<bool> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => coerce_bool(value).ok_or_else(|| {
            ExecutorError::InvalidConfig(format!("{key}: cannot interpret {value:?} as bool"))
        }),
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i != 0)
            } else {
                n.as_u64().map(|u| u != 0)
            }
        }
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" => Some(true),
            "false" | "f" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
