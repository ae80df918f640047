//! Fixed locations and environment variable names shared with the platform.

use std::path::PathBuf;

/// Where the platform mounts the environment descriptor.
pub const DEFAULT_ENV_FILE_PATH: &str = "/in/env.yaml";

/// Overrides [`DEFAULT_ENV_FILE_PATH`] when set.
pub const ENV_FILE_VAR: &str = "YMIR_ENV_FILE";

/// Overrides the default stage weights, e.g. `0.2,0.6,0.2`.
pub const STAGE_WEIGHTS_VAR: &str = "YMIR_STAGE_WEIGHTS";

/// Upper bound on the number of model stages kept in a training result.
pub const MAX_MODEL_STAGES: usize = 11;

/// First protocol version that understands `model_stages`.
pub const MULTI_STAGE_PROTOCOL_VERSION: &str = "1.0.0";

/// Resolve the environment descriptor path, honouring [`ENV_FILE_VAR`].
#[must_use]
pub fn env_file_path() -> PathBuf {
    match std::env::var(ENV_FILE_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_ENV_FILE_PATH),
    }
}
