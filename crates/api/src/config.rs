//! Application configuration loaded from environment variables.

use std::time::Duration;

use worker::{PoolConfig, SimulatedLatency};

/// Server and worker pool configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8080`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `WORKER_COUNT` — concurrent order workers (default: `5`)
/// - `QUEUE_CAPACITY` — queued orders before submission waits (default: `100`)
/// - `SIMULATED_LATENCY_MS` — base latency of the simulated fulfillment
///   services, `0` disables it (default: `1000`)
///
/// Values that fail to parse fall back to their defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub worker_count: usize,
    pub queue_capacity: usize,
    pub simulated_latency_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT").unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            worker_count: parse_env("WORKER_COUNT").unwrap_or(defaults.worker_count),
            queue_capacity: parse_env("QUEUE_CAPACITY").unwrap_or(defaults.queue_capacity),
            simulated_latency_ms: parse_env("SIMULATED_LATENCY_MS")
                .unwrap_or(defaults.simulated_latency_ms),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the worker pool sizing.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.worker_count, self.queue_capacity)
    }

    /// Returns the latency scale for the simulated fulfillment services.
    pub fn simulated_latency(&self) -> SimulatedLatency {
        SimulatedLatency::new(Duration::from_millis(self.simulated_latency_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            worker_count: 5,
            queue_capacity: 100,
            simulated_latency_ms: 1000,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.worker_count, 5);
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.simulated_latency_ms, 1000);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_pool_config() {
        let config = Config {
            worker_count: 2,
            queue_capacity: 7,
            ..Config::default()
        };
        assert_eq!(config.pool_config(), PoolConfig::new(2, 7));
    }

    #[test]
    fn test_simulated_latency() {
        let config = Config {
            simulated_latency_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.simulated_latency(), SimulatedLatency::none());
        assert_eq!(
            Config::default().simulated_latency().unit(),
            Duration::from_secs(1)
        );
    }
}
