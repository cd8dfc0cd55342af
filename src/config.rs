use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::time::Duration;
use toml::map::Map;

/// One entry of the network table. Resolved once at startup and never mutated.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: u64,
    pub explorer_url: String,
    pub currency: String,
    pub decimals: u8,
}

impl NetworkConfig {
    /// Look up a built-in network by key (e.g. `holesky`).
    pub fn builtin(key: &str) -> Option<Self> {
        match key {
            "holesky" => Some(Self {
                name: "Holesky Testnet".to_string(),
                rpc_url: "https://rpc.ankr.com/eth_holesky".to_string(),
                chain_id: 17000,
                explorer_url: "https://holesky.etherscan.io".to_string(),
                currency: "ETH".to_string(),
                decimals: 18,
            }),
            _ => None,
        }
    }

    pub fn builtin_keys() -> &'static [&'static str] {
        &["holesky"]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SenderConfig {
    pub network: NetworkConfig,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub monitoring: MonitoringSettings,
    #[serde(default)]
    pub dispatch: DispatchSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_seconds: u64,
    pub max_delay_seconds: u64,
    pub backoff_multiplier: f64,
    /// Upper bound on a single connection attempt; an unanswered attempt counts as failed.
    #[serde(default = "default_attempt_timeout_seconds")]
    pub attempt_timeout_seconds: u64,
}

fn default_attempt_timeout_seconds() -> u64 {
    10
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_seconds: 2,
            max_delay_seconds: 2,
            backoff_multiplier: 1.0,
            attempt_timeout_seconds: default_attempt_timeout_seconds(),
        }
    }
}

impl RetrySettings {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitoringSettings {
    pub transaction_timeout_seconds: u64,
    pub poll_interval_millis: u64,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            transaction_timeout_seconds: 120,
            poll_interval_millis: 2_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchSettings {
    pub settle_delay_millis: u64,
    pub default_gas_limit: u64,
    pub gas_limit_buffer: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            settle_delay_millis: 1000,
            default_gas_limit: 21_000,
            gas_limit_buffer: 1_000,
        }
    }
}

impl DispatchSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_millis)
    }
}

impl SenderConfig {
    /// Defaults wrapped around a built-in network entry.
    pub fn for_network(key: &str) -> Result<Self> {
        let network = NetworkConfig::builtin(key).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown network '{}' (available: {})",
                key,
                NetworkConfig::builtin_keys().join(", ")
            )
        })?;

        Ok(Self {
            network,
            retry: RetrySettings::default(),
            monitoring: MonitoringSettings::default(),
            dispatch: DispatchSettings::default(),
        })
    }

    pub fn load(path: &str) -> Result<Self> {
        dotenv::dotenv().ok();

        let common_content = Self::load_common_config();
        let specific_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;

        let merged_content = Self::merge_configs(common_content, specific_content)?;
        let content = Self::substitute_env_vars(merged_content)?;

        let config: SenderConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.monitoring.poll_interval_millis)
    }

    pub fn transaction_timeout(&self) -> Duration {
        Duration::from_secs(self.monitoring.transaction_timeout_seconds)
    }

    fn load_common_config() -> String {
        fs::read_to_string("configs/common.toml").unwrap_or_default()
    }

    fn merge_configs(common: String, specific: String) -> Result<String> {
        if common.is_empty() {
            return Ok(specific);
        }

        let common_toml: toml::Value = toml::from_str(&common)?;
        let specific_toml: toml::Value = toml::from_str(&specific)?;

        // specific overrides common
        let merged = Self::merge_toml_values(common_toml, specific_toml);
        Ok(toml::to_string_pretty(&merged)?)
    }

    fn merge_toml_values(mut base: toml::Value, override_val: toml::Value) -> toml::Value {
        match (&mut base, override_val) {
            (toml::Value::Table(base_map), toml::Value::Table(override_map)) => {
                for (key, value) in override_map {
                    let existing = base_map
                        .get(&key)
                        .cloned()
                        .unwrap_or(toml::Value::Table(Map::new()));
                    base_map.insert(key, Self::merge_toml_values(existing, value));
                }
                base
            }
            (_, override_val) => override_val,
        }
    }

    /// Replace every `${VAR}` with its value. A placeholder whose variable is unset is
    /// an error rather than being left in the config literally.
    fn substitute_env_vars(content: String) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
        let mut result = content.clone();
        let mut missing: Vec<String> = Vec::new();

        for cap in re.captures_iter(&content) {
            match env::var(&cap[1]) {
                Ok(value) => result = result.replace(&cap[0], &value),
                Err(_) => {
                    if !missing.iter().any(|name| name == &cap[1]) {
                        missing.push(cap[1].to_string());
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(anyhow::anyhow!(
                "Environment variable(s) {} not set for config placeholder",
                missing.join(", ")
            ));
        }

        Ok(result)
    }
}
