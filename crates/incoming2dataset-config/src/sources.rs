// Configuration file loading.
//
// A TOML file is optional and only ever a base layer: deployment contract
// variables override whatever the file says, and validation runs on the
// merged result.

use crate::env::{self, EnvSource};
use crate::RelocatorConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Names a TOML config file to load instead of building purely from the
/// deployment environment.
pub const CONFIG_PATH_VAR: &str = "INCOMING2DATASET_CONFIG";

/// Load configuration from the file named by INCOMING2DATASET_CONFIG when
/// set, otherwise from the deployment environment alone.
pub(crate) fn load_config<E: EnvSource>(env: &E) -> Result<RelocatorConfig> {
    if let Some(path) = env.get(CONFIG_PATH_VAR) {
        return load_from_file_path(Path::new(&path), env);
    }

    let config = env::from_env(env)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a specific file path, then apply environment
/// overrides and validate.
pub(crate) fn load_from_file_path<E: EnvSource>(
    path: impl AsRef<Path>,
    env: &E,
) -> Result<RelocatorConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: RelocatorConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    env::apply_env_overrides(&mut config, env);
    config.validate()?;
    Ok(config)
}
