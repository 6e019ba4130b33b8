use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Service name reported in structured logs
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Hard ceiling on list/query limits. A request asking for more than
    /// this is rejected, never silently clamped.
    #[serde(default = "default_max_result_count")]
    pub max_result_count: i64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "pylon".to_string()
}

fn default_max_result_count() -> i64 {
    1024
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            service_name: default_service_name(),
            max_result_count: default_max_result_count(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from PYLON_-prefixed environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("PYLON"))
            .build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.max_result_count, 1024);
    }
}
