//! Environment variable configuration handling

use crate::config::AppConfig;
use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "LPM_ROUTER_";

/// Configuration file path from the environment, if set.
pub fn config_path_from_env() -> Option<String> {
    env::var(format!("{ENV_PREFIX}CONFIG")).ok()
}

/// Apply environment variable overrides over base configuration
pub fn apply_env_config(mut base_config: AppConfig) -> AppConfig {
    if let Ok(level) = env::var(format!("{ENV_PREFIX}LOG_LEVEL")) {
        base_config.log_level = level;
    }

    base_config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_env_config() {
        env::remove_var("LPM_ROUTER_LOG_LEVEL");
        env::set_var("LPM_ROUTER_LOG_LEVEL", "trace");

        let config = apply_env_config(AppConfig::default());
        assert_eq!(config.log_level, "trace");

        env::remove_var("LPM_ROUTER_LOG_LEVEL");
    }

    #[test]
    fn test_config_path_from_env() {
        env::remove_var("LPM_ROUTER_CONFIG");
        assert_eq!(config_path_from_env(), None);

        env::set_var("LPM_ROUTER_CONFIG", "/etc/lpm-router.toml");
        assert_eq!(
            config_path_from_env(),
            Some("/etc/lpm-router.toml".to_string())
        );

        env::remove_var("LPM_ROUTER_CONFIG");
    }
}
