//! Configuration loading from environment variables.
//!
//! All values come from `SERVING_CORE_*` variables with sensible defaults.
//! Invalid values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `SERVING_CORE_DEFAULT_STAGE` | production | Stage tag used when a request names none |
//! | `SERVING_CORE_PREDICT_TIMEOUT_MS` | 30000 | Default predict deadline (0 = none) |
//! | `SERVING_CORE_MAX_BATCH` | 256 | Max records per request |
//! | `SERVING_CORE_LOG_LEVEL` | info | Tracing filter directive |
//! | `SERVING_CORE_LOG_FORMAT` | json | `json` or `pretty` |

use std::time::Duration;

use crate::engine::{DispatchConfig, DEFAULT_MAX_RECORDS};
use crate::telemetry::{LogConfig, LogFormat};

/// All configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub dispatch: DispatchConfig,
    pub log: LogConfig,
}

/// Effective configuration summary (for startup logging).
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub default_stage: String,
    pub predict_timeout_ms: u64,
    pub max_batch_records: usize,
    pub log_level: String,
}

/// Parse a `u64` env var, returning `default` on missing or invalid.
fn parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    let default_stage = parse_string("SERVING_CORE_DEFAULT_STAGE", "production");
    let timeout_ms = parse_u64("SERVING_CORE_PREDICT_TIMEOUT_MS", 30_000);
    let max_batch_records = parse_usize("SERVING_CORE_MAX_BATCH", DEFAULT_MAX_RECORDS).max(1);

    let default_timeout = if timeout_ms == 0 {
        None
    } else {
        Some(Duration::from_millis(timeout_ms))
    };

    let log = LogConfig {
        format: LogFormat::parse(&parse_string("SERVING_CORE_LOG_FORMAT", "json")),
        level: parse_string("SERVING_CORE_LOG_LEVEL", "info"),
        output_path: None,
    };

    EnvConfig {
        dispatch: DispatchConfig {
            default_stage,
            default_timeout,
            max_batch_records,
        },
        log,
    }
}

impl EnvConfig {
    /// Return a summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            default_stage: self.dispatch.default_stage.clone(),
            predict_timeout_ms: self
                .dispatch
                .default_timeout
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            max_batch_records: self.dispatch.max_batch_records,
            log_level: self.log.level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize env-mutating tests to avoid cross-test pollution.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "SERVING_CORE_DEFAULT_STAGE",
        "SERVING_CORE_PREDICT_TIMEOUT_MS",
        "SERVING_CORE_MAX_BATCH",
        "SERVING_CORE_LOG_LEVEL",
        "SERVING_CORE_LOG_FORMAT",
    ];

    fn clear_env_vars() {
        for k in ENV_KEYS {
            std::env::remove_var(k);
        }
    }

    #[test]
    fn test_defaults_are_sensible() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        let cfg = load();
        assert_eq!(cfg.dispatch.default_stage, "production");
        assert_eq!(cfg.dispatch.default_timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.dispatch.max_batch_records, DEFAULT_MAX_RECORDS);
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.log.format, LogFormat::Json);
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        std::env::set_var("SERVING_CORE_PREDICT_TIMEOUT_MS", "0");
        let cfg = load();
        assert_eq!(cfg.dispatch.default_timeout, None);
        clear_env_vars();
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        std::env::set_var("SERVING_CORE_PREDICT_TIMEOUT_MS", "not-a-number");
        std::env::set_var("SERVING_CORE_MAX_BATCH", "-3");
        std::env::set_var("SERVING_CORE_DEFAULT_STAGE", "  ");
        let cfg = load();
        assert_eq!(cfg.dispatch.default_timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.dispatch.max_batch_records, DEFAULT_MAX_RECORDS);
        assert_eq!(cfg.dispatch.default_stage, "production");
        clear_env_vars();
    }

    #[test]
    fn test_max_batch_floor_is_one() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        std::env::set_var("SERVING_CORE_MAX_BATCH", "0");
        let cfg = load();
        assert_eq!(cfg.dispatch.max_batch_records, 1);
        clear_env_vars();
    }
}
