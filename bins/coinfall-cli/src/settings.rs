//! Configuration loading.
//!
//! Sources, lowest precedence first: the built-in default record or a
//! configuration file (JSON, TOML or YAML by extension), then `COINFALL__*`
//! environment variables. Command-line overrides are applied by the caller.

use std::path::Path;

use anyhow::{Context, Result};
use coinfall_core::config::PayoutConfig;
use config::{Config, Environment, File};

/// Environment prefix; `COINFALL__BASE_PRIZE=20000` sets `base_prize`.
pub const ENV_PREFIX: &str = "COINFALL";

/// The process environment source.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true)
}

/// Load and validate a configuration record.
pub fn load(path: Option<&Path>, env: Environment) -> Result<PayoutConfig> {
    let mut builder = Config::builder();
    builder = match path {
        Some(p) => builder.add_source(File::from(p)),
        None => builder.add_source(
            Config::try_from(&PayoutConfig::default()).context("failed to encode default configuration")?,
        ),
    };

    let cfg: PayoutConfig = builder
        .add_source(env)
        .build()
        .context("failed to read configuration sources")?
        .try_deserialize()
        .context("configuration does not match the payout record")?;

    cfg.validate().context("configuration rejected")?;
    Ok(cfg)
}
