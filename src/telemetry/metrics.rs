//! Metric recording helpers over the `metrics` facade.
//!
//! The facade is recorder-agnostic: without an installed recorder these are
//! no-ops, so core code calls them unconditionally.

use metrics::counter;

use crate::engine::ErrorClass;

/// Record a completed prediction.
pub fn record_predict_success(model: &str) {
    counter!("serving_predict_total", "model" => model.to_string(), "outcome" => "ok")
        .increment(1);
}

/// Record a failed prediction, labeled with its error class.
pub fn record_predict_failure(model: &str, class: ErrorClass) {
    let class = match class {
        ErrorClass::NotFound => "not_found",
        ErrorClass::ClientError => "client_error",
        ErrorClass::ServerError => "server_error",
        ErrorClass::Timeout => "timeout",
    };
    counter!("serving_predict_total", "model" => model.to_string(), "outcome" => class.to_string())
        .increment(1);
}

/// Record a variant publish, distinguishing first publish from replacement.
pub fn record_publish(model: &str, replaced: bool) {
    let kind = if replaced { "replace" } else { "create" };
    counter!("serving_publish_total", "model" => model.to_string(), "kind" => kind.to_string())
        .increment(1);
}
