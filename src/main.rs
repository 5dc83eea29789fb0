use phosphor_scope::ScopeConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    phosphor_scope::run(ScopeConfig::default())?;
    Ok(())
}
