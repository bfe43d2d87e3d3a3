//! Process configuration.
//!
//! Read once at startup from CLI flags or environment variables, then
//! validated and immutable for the lifetime of the process. Env names
//! match what the surrounding deployment tooling already sets
//! (`PROM_URL`, `TARGET_NAMESPACE`, ...).

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::{LogFormat, LogLevel};

/// Loadcast - one-minute-ahead CPU utilization forecaster
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "loadcast")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Prometheus base URL
    #[arg(
        long,
        env = "PROM_URL",
        default_value = "http://monitoring-kube-prometheus-stack-prometheus.monitoring.svc:9090"
    )]
    pub prom_url: String,

    /// Namespace of the workload to forecast
    #[arg(long, env = "TARGET_NAMESPACE", default_value = "demo")]
    pub namespace: String,

    /// Deployment name to forecast
    #[arg(long, env = "TARGET_DEPLOYMENT", default_value = "cpu-demo")]
    pub deployment: String,

    /// How many lagged samples to use as features
    #[arg(long, env = "LAGS", default_value_t = 60)]
    pub lags: usize,

    /// Seconds between loop iterations
    #[arg(long, env = "INTERVAL_SEC", default_value_t = 60)]
    pub interval_secs: u64,

    /// Extra minutes of history fetched beyond the lag count, to absorb
    /// imperfect scrape cadence
    #[arg(long, env = "LOOKBACK_MARGIN_MIN", default_value_t = 10)]
    pub lookback_margin_min: u64,

    /// Bind address for the /metrics and /healthz surface
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0")]
    pub listen_addr: String,

    /// Bind port for the /metrics and /healthz surface
    #[arg(long, env = "LISTEN_PORT", default_value_t = 8000)]
    pub listen_port: u16,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "LOG_LEVEL", default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format (human|jsonl)
    #[arg(long, env = "LOG_FORMAT", default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,
}

/// Startup-time configuration errors. These terminate the process;
/// nothing here is recoverable at runtime.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("lags must be at least 1")]
    ZeroLags,
    #[error("interval must be at least 1 second")]
    ZeroInterval,
    #[error("listen port must be non-zero")]
    ZeroPort,
    #[error("prometheus URL must start with http:// or https://")]
    BadPromUrl,
    #[error("deployment name must not be empty")]
    EmptyDeployment,
    #[error("namespace must not be empty")]
    EmptyNamespace,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lags == 0 {
            return Err(ConfigError::ZeroLags);
        }
        if self.interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.listen_port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if !self.prom_url.starts_with("http://") && !self.prom_url.starts_with("https://") {
            return Err(ConfigError::BadPromUrl);
        }
        if self.deployment.is_empty() {
            return Err(ConfigError::EmptyDeployment);
        }
        if self.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        Ok(())
    }

    /// Total minutes of history requested per iteration.
    pub fn lookback_minutes(&self) -> u64 {
        self.lags as u64 + self.lookback_margin_min
    }
}
