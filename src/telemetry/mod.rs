//! Telemetry: structured logging and metric recording.

mod logging;
mod metrics;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
pub use metrics::{record_predict_failure, record_predict_success, record_publish};
