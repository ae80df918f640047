use ymir_exc::EnvConfig;

/// Execute the env command.
pub fn execute(env: &EnvConfig) -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(env)?);
    Ok(())
}
