//! Yield aggregation over fetched crop records.

use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::domain::crop::CropRecord;

/// Summary statistics derived from a fetched record set at request time.
///
/// Records whose yield is missing or not numeric are excluded from the sum
/// and counted in `skipped`, so one bad row never aborts the whole request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct YieldSummary {
    pub total: f64,
    pub skipped: usize,
}

/// Sums `yield_quantity` across `records`.
///
/// JSON numbers and numeric strings both count (the remote store echoes
/// historical writes of either shape); everything else is skipped. The
/// result does not depend on the order of the input.
pub fn total_yield(records: &[CropRecord]) -> YieldSummary {
    let mut total = 0.0;
    let mut skipped = 0;
    for record in records {
        match parse_yield(&record.yield_quantity) {
            Some(value) => total += value,
            None => skipped += 1,
        }
    }
    YieldSummary { total, skipped }
}

fn parse_yield(value: &JsonValue) -> Option<f64> {
    let parsed = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}
