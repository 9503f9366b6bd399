//! Caller input validation for the serving core.
//!
//! The dispatcher validates structure only: the input must be a non-null
//! JSON sequence of records. Record shape and dtype are runtime concerns,
//! checked by the adapter at invocation time.

use serde_json::Value;

use super::error::InferenceError;
use super::runtime::RuntimeError;

/// Default cap on records per request, overridable via configuration.
pub const DEFAULT_MAX_RECORDS: usize = 256;

/// A structurally validated batch of caller-supplied records.
///
/// Records stay as opaque JSON values until an adapter converts them into
/// its native representation.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    records: Vec<Value>,
}

impl RecordBatch {
    /// Validate that `input` is a non-null sequence and split it into records.
    pub fn from_value(input: Value, max_records: usize) -> Result<Self, InferenceError> {
        let records = match input {
            Value::Array(records) => records,
            Value::Null => {
                return Err(InferenceError::InvalidInput("input cannot be null".into()));
            }
            other => {
                return Err(InferenceError::InvalidInput(format!(
                    "expected a sequence of records, got {}",
                    json_type_name(&other)
                )));
            }
        };

        if records.len() > max_records {
            return Err(InferenceError::InvalidInput(format!(
                "batch exceeds maximum size: {} > {} records",
                records.len(),
                max_records
            )));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert every record into a numeric row, enforcing a uniform arity.
    ///
    /// Adapters for dense-tensor runtimes use this to build their native
    /// arrays; a record that is not a sequence of numbers, or whose arity
    /// does not match `expected_dim`, is runtime-level input rejection.
    pub fn to_rows(&self, expected_dim: usize) -> Result<Vec<Vec<f64>>, RuntimeError> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| record_to_row(i, record, expected_dim))
            .collect()
    }
}

fn record_to_row(index: usize, record: &Value, expected_dim: usize) -> Result<Vec<f64>, RuntimeError> {
    let fields = record.as_array().ok_or_else(|| {
        RuntimeError::InvalidInput(format!(
            "record {} must be a sequence of numbers, got {}",
            index,
            json_type_name(record)
        ))
    })?;

    if fields.len() != expected_dim {
        return Err(RuntimeError::InvalidInput(format!(
            "record {} has {} fields, model expects {}",
            index,
            fields.len(),
            expected_dim
        )));
    }

    fields
        .iter()
        .map(|field| {
            field.as_f64().ok_or_else(|| {
                RuntimeError::InvalidInput(format!(
                    "record {} contains a non-numeric field: {}",
                    index,
                    json_type_name(field)
                ))
            })
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
