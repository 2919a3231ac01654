use anyhow::Result;

use crate::config::Config;

/// Validates the configuration the way `serve` would, then reports what it found.
pub fn check(config: &Config) -> Result<()> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    for setting in config.insecure_defaults() {
        tracing::warn!(setting, "development default in use");
    }

    let sanity = &config.sanity;
    tracing::info!(
        environment = ?config.app.environment,
        sanity_configured = sanity.is_configured(),
        sanity_writable = sanity.is_configured() && sanity.write_token().is_some(),
        "configuration is valid"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEV_SESSION_SECRET, RunMode, tests::test_config};

    #[test]
    fn test_check_accepts_valid_config() {
        assert!(check(&test_config(RunMode::Production)).is_ok());
    }

    #[test]
    fn test_check_rejects_dev_secret_in_production() {
        let mut config = test_config(RunMode::Production);
        config.auth.session_secret = DEV_SESSION_SECRET.to_owned();

        assert!(check(&config).is_err());
    }
}
