//! Server configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use runtime::RuntimeConfig;

/// Settings for one server process.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Fixed world seed; a random one is drawn when unset.
    pub seed: Option<u64>,
    pub command_buffer_size: usize,
    /// Directory for the log file; logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            command_buffer_size: RuntimeConfig::default().command_buffer_size,
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Construct server configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ECO_SEED` - world seed (default: random)
    /// - `ECO_COMMAND_BUFFER` - command channel capacity (default: 32)
    /// - `ECO_LOG_DIR` - directory for `eco-server.log` (default: none)
    ///
    /// Malformed values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = parse(&lookup, "ECO_SEED") {
            config.seed = Some(seed);
        }
        if let Some(size) = parse::<usize>(&lookup, "ECO_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }
        if let Some(dir) = lookup("ECO_LOG_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            seed: self.seed,
            command_buffer_size: self.command_buffer_size,
            ..RuntimeConfig::default()
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.seed, None);
        assert_eq!(config.command_buffer_size, 32);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("ECO_SEED", "42"),
            ("ECO_COMMAND_BUFFER", "8"),
            ("ECO_LOG_DIR", "/tmp/eco"),
        ]);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.command_buffer_size, 8);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/eco")));
        assert_eq!(config.runtime_config().seed, Some(42));
    }

    #[test]
    fn malformed_values_are_ignored() {
        let config = config_from(&[("ECO_SEED", "forty-two"), ("ECO_COMMAND_BUFFER", "0")]);
        assert_eq!(config.seed, None);
        assert_eq!(config.command_buffer_size, 1);
    }
}
