//! Loading of session tuning from TOML files.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use garden_world::GameConfig;

/// Reads the tuning at `path`, or returns the defaults when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config at {}", path.display()))
}

fn parse(contents: &str) -> Result<GameConfig> {
    let config: GameConfig =
        toml::from_str(contents).context("failed to parse config toml contents")?;
    if config.max_blight <= 0 {
        bail!("max_blight must be positive, got {}", config.max_blight);
    }
    if config.starting_money < 0 {
        bail!(
            "starting_money must not be negative, got {}",
            config.starting_money
        );
    }
    Ok(config)
}
