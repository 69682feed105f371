//! Configuration models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    pub workers: Option<usize>,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Whether CORS is enabled
    #[serde(default = "default_cors_enabled")]
    pub enabled: bool,
    /// Allowed origins, "*" allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_cors_enabled(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl CorsConfig {
    /// Check whether any origin is allowed
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Batch orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Upper bound on operations processed at the same time
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_operations: usize,
    /// Assumed per-item duration used for the completion estimate
    #[serde(default = "default_item_duration_ms")]
    pub assumed_item_duration_ms: u64,
    /// Maximum number of operations returned by the listing endpoint
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    /// Optional per-kind item timeout in milliseconds; a timed-out item is
    /// recorded as an error outcome
    #[serde(default)]
    pub item_timeouts: HashMap<String, u64>,
    /// Outcome rates for the simulated work executor
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_operations: default_max_concurrent(),
            assumed_item_duration_ms: default_item_duration_ms(),
            list_limit: default_list_limit(),
            item_timeouts: HashMap::new(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Per-item timeout for an operation kind, if configured
    pub fn item_timeout(&self, kind: &str) -> Option<Duration> {
        self.item_timeouts
            .get(kind)
            .copied()
            .map(Duration::from_millis)
    }

    /// Assumed per-item duration
    pub fn assumed_item_duration(&self) -> Duration {
        Duration::from_millis(self.assumed_item_duration_ms)
    }

    /// Validate batch configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_operations == 0 {
            return Err("max_concurrent_operations cannot be 0".to_string());
        }

        if self.list_limit == 0 {
            return Err("list_limit cannot be 0".to_string());
        }

        if let Some((kind, _)) = self.item_timeouts.iter().find(|(_, ms)| **ms == 0) {
            return Err(format!("item timeout for '{}' cannot be 0", kind));
        }

        self.simulation.validate()
    }
}

/// Outcome rates for the simulated work executor that stands in for the
/// real document generation / export pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fraction of items that succeed cleanly
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
    /// Fraction of items that succeed with warnings
    #[serde(default = "default_warning_rate")]
    pub warning_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            success_rate: default_success_rate(),
            warning_rate: default_warning_rate(),
        }
    }
}

impl SimulationConfig {
    /// Validate simulation rates
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err("success_rate must be between 0 and 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.warning_rate) {
            return Err("warning_rate must be between 0 and 1".to_string());
        }
        if self.success_rate + self.warning_rate > 1.0 {
            return Err("success_rate + warning_rate cannot exceed 1".to_string());
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_enabled() -> bool {
    true
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_concurrent() -> usize {
    8
}

fn default_item_duration_ms() -> u64 {
    500
}

fn default_list_limit() -> usize {
    20
}

fn default_success_rate() -> f64 {
    0.8
}

fn default_warning_rate() -> f64 {
    0.1
}
