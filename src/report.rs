//! Report assembly: shapes accumulated scan rows into a two-sheet workbook
//! (`Summary` + `Inconsistent Values`) and writes it once at the end of a run.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::evaluate::ColumnMetrics;

pub const SUMMARY_SHEET: &str = "Summary";
pub const DETAIL_SHEET: &str = "Inconsistent Values";

pub const SUMMARY_HEADERS: &[&str] = &[
    "file",
    "sheet",
    "column",
    "total_records",
    "non_null_records",
    "null_count",
    "detected_pattern",
    "avg_length",
    "allowed_min_length",
    "allowed_max_length",
    "consistent_count",
    "inconsistent_count",
    "consistency_percentage",
    "inconsistent_values_sample",
];

pub const DETAIL_HEADERS: &[&str] = &["file", "sheet", "column", "inconsistent_value"];

/// One `Summary` row per (file, sheet, column), or one synthetic row per
/// unreadable file.
#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub file: String,
    pub sheet: String,
    pub column: String,
    pub outcome: ColumnOutcome,
}

#[derive(Debug, Clone)]
pub enum ColumnOutcome {
    Evaluated {
        metrics: ColumnMetrics,
        /// First-N inconsistent values, pre-joined with " | ".
        sample: String,
    },
    /// Workbook-level failure: numeric cells render blank, the sample cell
    /// carries the error message.
    Failed { message: String },
}

/// One `Inconsistent Values` row per flagged cell.
#[derive(Debug, Clone)]
pub struct DetailRow {
    pub file: String,
    pub sheet: String,
    pub column: String,
    pub value: String,
}

pub fn write_report(path: &Path, summary: &[SummaryRow], details: &[DetailRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet().set_name(SUMMARY_SHEET)?;
    write_headers(sheet, SUMMARY_HEADERS, &header_format)?;
    for (idx, row) in summary.iter().enumerate() {
        let r = (idx + 1) as u32;
        sheet.write_string(r, 0, &row.file)?;
        sheet.write_string(r, 1, &row.sheet)?;
        sheet.write_string(r, 2, &row.column)?;
        match &row.outcome {
            ColumnOutcome::Evaluated { metrics, sample } => {
                sheet.write_number(r, 3, metrics.total_records as f64)?;
                sheet.write_number(r, 4, metrics.non_null_records as f64)?;
                sheet.write_number(r, 5, metrics.null_count as f64)?;
                sheet.write_string(r, 6, metrics.detected_pattern.as_str())?;
                sheet.write_number(r, 7, metrics.avg_length)?;
                sheet.write_number(r, 8, metrics.allowed_min_length as f64)?;
                sheet.write_number(r, 9, metrics.allowed_max_length as f64)?;
                sheet.write_number(r, 10, metrics.consistent_count as f64)?;
                sheet.write_number(r, 11, metrics.inconsistent_count as f64)?;
                sheet.write_number(r, 12, metrics.consistency_percentage)?;
                sheet.write_string(r, 13, sample)?;
            }
            ColumnOutcome::Failed { message } => {
                sheet.write_string(r, 6, "<error>")?;
                sheet.write_string(r, 13, format!("Error: {message}"))?;
            }
        }
    }
    sheet.autofit();

    let sheet = workbook.add_worksheet().set_name(DETAIL_SHEET)?;
    write_headers(sheet, DETAIL_HEADERS, &header_format)?;
    for (idx, row) in details.iter().enumerate() {
        let r = (idx + 1) as u32;
        sheet.write_string(r, 0, &row.file)?;
        sheet.write_string(r, 1, &row.sheet)?;
        sheet.write_string(r, 2, &row.column)?;
        sheet.write_string(r, 3, &row.value)?;
    }
    sheet.autofit();

    workbook
        .save(path)
        .with_context(|| format!("Saving report workbook {path:?}"))?;
    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}
