pub mod check;
pub mod config;
pub mod status;

use anyhow::Context;
use routerping_core::config::Config;
use routerping_core::cycle::CycleContext;
use std::path::Path;

/// Load the config and build the context for one target.
///
/// The address comes from the command line, falling back to `address:` in the
/// config file.
pub fn load_context(config_path: &Path, address: Option<&str>) -> anyhow::Result<(Config, CycleContext)> {
    let config = Config::load(config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let address = match address.or(config.address.as_deref()) {
        Some(a) if !a.trim().is_empty() => a.trim().to_string(),
        _ => anyhow::bail!("no router address: pass --address or set 'address' in the config"),
    };
    let tz = config.tz().context("invalid time_zone in config")?;
    let classifier = config
        .classifier()
        .context("invalid network_errors in config")?;

    let ctx = CycleContext {
        log_path: config.log_path(&address),
        address,
        tz,
        classifier,
    };
    Ok((config, ctx))
}
