//! Cell-level null detection and canonical display text.
//!
//! Cells arrive as [`calamine::Data`] so numeric-looking text is never
//! silently coerced into a true number; the distinction matters for pattern
//! classification.

use calamine::Data;
use chrono::NaiveTime;

/// A cell counts as null when it is empty or holds a string that is blank
/// after trimming. Everything else, including `0`, `false`, and `"0"`, is a
/// real value.
pub fn is_null(value: &Data) -> bool {
    match value {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Canonical display text for a cell: empty string for nulls, natural string
/// conversion otherwise. Integral floats render without a fractional part,
/// typed timestamps in ISO-like form.
pub fn to_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(s) => {
            if s.trim().is_empty() {
                String::new()
            } else {
                s.clone()
            }
        }
        // f64 Display renders integral values without a fractional part and
        // never switches to scientific notation, so magnitudes beyond i64
        // stay exact.
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) if ts.time() == NaiveTime::MIN => ts.format("%Y-%m-%d").to_string(),
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
