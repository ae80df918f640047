use ymir_exc::{EnvConfig, MergedConfig};

/// Execute the get-bool command.
pub fn execute(env: EnvConfig, key: &str, default: bool) -> anyhow::Result<()> {
    let cfg = MergedConfig::load(env)?;
    println!("{}", cfg.get_bool(key, default)?);
    Ok(())
}
