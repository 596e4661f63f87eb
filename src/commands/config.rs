use anyhow::Result;
use panel_pricing::config::{load_config, validate_config};

/// Print the effective configuration as TOML.
pub fn show() -> Result<()> {
    let config = load_config()?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Validate the configuration and report the result.
pub fn validate() -> Result<()> {
    let config = load_config()?;
    validate_config(&config)?;
    println!("Configuration is valid");
    Ok(())
}
