//! Per-column consistency evaluation: pattern conformance combined with the
//! numeric length band, aggregated into [`ColumnMetrics`].

use calamine::Data;

use crate::pattern::Pattern;
use crate::value::{is_null, to_text};

/// Consistency metrics for one (file, sheet, column) triple. Produced fresh
/// per column scan; never shared or mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetrics {
    pub total_records: usize,
    pub non_null_records: usize,
    pub null_count: usize,
    pub detected_pattern: Pattern,
    /// Average text length of non-null values, rounded to two decimals.
    pub avg_length: f64,
    /// Reported band bounds: floor of the lower, ceiling of the upper. The
    /// consistency check itself uses the un-rounded bounds.
    pub allowed_min_length: usize,
    pub allowed_max_length: usize,
    pub consistent_count: usize,
    pub inconsistent_count: usize,
    pub consistency_percentage: f64,
    /// Display text of every non-conforming value, in column order.
    pub inconsistent_values: Vec<String>,
}

impl ColumnMetrics {
    fn all_null(total_records: usize) -> Self {
        Self {
            total_records,
            non_null_records: 0,
            null_count: total_records,
            detected_pattern: Pattern::Other,
            avg_length: 0.0,
            allowed_min_length: 0,
            allowed_max_length: 0,
            consistent_count: 0,
            inconsistent_count: 0,
            consistency_percentage: 100.0,
            inconsistent_values: Vec::new(),
        }
    }
}

/// Evaluates a column's values against its detected pattern.
///
/// A value is consistent when the pattern classifier accepts it and, for
/// `number` columns only, its text length falls inside the tolerance band
/// around the column's average length. Text and date fields have naturally
/// variable length, so the band never gates them. Malformed cells degrade to
/// "does not match"; this function never fails.
pub fn evaluate_column(values: &[Data], length_tolerance: f64) -> ColumnMetrics {
    let total_records = values.len();
    let non_null: Vec<&Data> = values.iter().filter(|v| !is_null(v)).collect();
    let non_null_records = non_null.len();
    let null_count = total_records - non_null_records;

    if non_null_records == 0 {
        return ColumnMetrics::all_null(total_records);
    }

    let detected_pattern = Pattern::detect(values.iter());

    let texts: Vec<String> = non_null.iter().map(|v| to_text(v)).collect();
    let total_len: usize = texts.iter().map(|t| t.chars().count()).sum();
    let avg_len = total_len as f64 / non_null_records as f64;
    // Un-rounded bounds drive the check; floor/ceil are reporting-only.
    let min_allowed = avg_len * (1.0 - length_tolerance);
    let max_allowed = avg_len * (1.0 + length_tolerance);

    let mut consistent_count = 0usize;
    let mut inconsistent_values = Vec::new();

    for (&value, text) in non_null.iter().zip(&texts) {
        let pattern_ok = detected_pattern.matches(value);
        let length_ok = if detected_pattern == Pattern::Number {
            let len = text.chars().count() as f64;
            min_allowed <= len && len <= max_allowed
        } else {
            true
        };
        if pattern_ok && length_ok {
            consistent_count += 1;
        } else {
            inconsistent_values.push(text.clone());
        }
    }

    let inconsistent_count = non_null_records - consistent_count;
    let percentage = consistent_count as f64 * 100.0 / non_null_records as f64;

    ColumnMetrics {
        total_records,
        non_null_records,
        null_count,
        detected_pattern,
        avg_length: round2(avg_len),
        allowed_min_length: min_allowed.floor() as usize,
        allowed_max_length: max_allowed.ceil() as usize,
        consistent_count,
        inconsistent_count,
        consistency_percentage: round2(percentage),
        inconsistent_values,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
