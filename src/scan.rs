//! Workbook walking: directory listing, per-sheet column extraction, and the
//! `scan` command entry point.
//!
//! Files are processed one at a time, sheet by sheet, column by column; all
//! summary and detail rows accumulate in memory and are written in a single
//! pass at the end. An unreadable workbook yields one synthetic row per output
//! sheet and the run continues; an unreadable input directory or an unwritable
//! report path aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use itertools::Itertools;
use log::{debug, info, warn};

use crate::{
    cli::ScanArgs,
    config::AuditConfig,
    evaluate::{self, ColumnMetrics},
    report::{self, ColumnOutcome, DetailRow, SummaryRow},
    value,
};

const ERROR_TAG: &str = "<error>";

pub fn execute(args: &ScanArgs) -> Result<()> {
    let config = AuditConfig::from_scan_args(args)?;
    let files = list_workbooks(&config.input_dir)?;
    info!(
        "Scanning {} workbook(s) in {:?}",
        files.len(),
        config.input_dir
    );

    let mut summary: Vec<SummaryRow> = Vec::new();
    let mut details: Vec<DetailRow> = Vec::new();

    for path in &files {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        debug!("Scanning workbook {file_name}");
        if let Err(err) = scan_workbook(path, &file_name, &config, &mut summary, &mut details) {
            warn!("Recording failure for {file_name}: {err:#}");
            summary.push(SummaryRow {
                file: file_name.clone(),
                sheet: ERROR_TAG.to_string(),
                column: ERROR_TAG.to_string(),
                outcome: ColumnOutcome::Failed {
                    message: format!("{err:#}"),
                },
            });
            details.push(DetailRow {
                file: file_name,
                sheet: ERROR_TAG.to_string(),
                column: ERROR_TAG.to_string(),
                value: format!("Error: {err:#}"),
            });
        }
    }

    report::write_report(&config.report, &summary, &details)?;
    info!("Report saved: {}", config.report.display());
    Ok(())
}

/// Direct children of `dir` whose names end in `.xlsx` (case-insensitive),
/// sorted by path for deterministic report order. Subdirectories are not
/// traversed.
pub fn list_workbooks(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Reading input directory {dir:?}"))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Reading directory entry in {dir:?}"))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.to_ascii_lowercase().ends_with(".xlsx"));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn scan_workbook(
    path: &Path,
    file_name: &str,
    config: &AuditConfig,
    summary: &mut Vec<SummaryRow>,
    details: &mut Vec<DetailRow>,
) -> Result<()> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("Opening workbook {path:?}"))?;
    let sheet_names = workbook.sheet_names().to_owned();
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Reading sheet '{sheet_name}'"))?;
        scan_sheet(file_name, &sheet_name, &range, config, summary, details);
    }
    Ok(())
}

/// The first row supplies column labels; remaining rows form the per-column
/// value sequences. Sheets with no data rows are skipped entirely.
fn scan_sheet(
    file_name: &str,
    sheet_name: &str,
    range: &Range<Data>,
    config: &AuditConfig,
    summary: &mut Vec<SummaryRow>,
    details: &mut Vec<DetailRow>,
) {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return;
    };
    let data_rows: Vec<&[Data]> = rows.collect();
    if data_rows.is_empty() {
        return;
    }

    for (col_idx, header_cell) in header_row.iter().enumerate() {
        let label = column_label(header_cell, col_idx);
        let values: Vec<Data> = data_rows
            .iter()
            .map(|row| row.get(col_idx).cloned().unwrap_or(Data::Empty))
            .collect();
        let metrics = evaluate::evaluate_column(&values, config.length_tolerance);
        push_column_rows(
            file_name,
            sheet_name,
            &label,
            metrics,
            config.sample_size,
            summary,
            details,
        );
    }
}

/// Blank header cells get a synthetic positional name.
fn column_label(cell: &Data, index: usize) -> String {
    let text = value::to_text(cell);
    if text.trim().is_empty() {
        format!("column_{}", index + 1)
    } else {
        text
    }
}

fn push_column_rows(
    file_name: &str,
    sheet_name: &str,
    column: &str,
    metrics: ColumnMetrics,
    sample_size: usize,
    summary: &mut Vec<SummaryRow>,
    details: &mut Vec<DetailRow>,
) {
    let sample = metrics
        .inconsistent_values
        .iter()
        .take(sample_size)
        .join(" | ");
    for value in &metrics.inconsistent_values {
        details.push(DetailRow {
            file: file_name.to_string(),
            sheet: sheet_name.to_string(),
            column: column.to_string(),
            value: value.clone(),
        });
    }
    summary.push(SummaryRow {
        file: file_name.to_string(),
        sheet: sheet_name.to_string(),
        column: column.to_string(),
        outcome: ColumnOutcome::Evaluated { metrics, sample },
    });
}
