use chrono::{DateTime, Utc};
use serde::Serialize;

/// Tag stamped on every record produced by the transform endpoint.
pub const RECORD_SOURCE: &str = "api";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedRecord {
    pub name: String,
    pub age: i64,
    pub processed_at: DateTime<Utc>,
    pub source: String,
}

/// Aggregate over all transformed records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordStats {
    Empty {
        total_records: usize,
        message: String,
    },
    Summary {
        total_records: usize,
        avg_age: f64,
        min_age: i64,
        max_age: i64,
    },
}
