//! Run configuration: input folder, report path, and the tuning knobs for
//! sampling and the numeric length band.
//!
//! Configuration is an explicit value passed into the scan entry point, never
//! process-wide state. Defaults can come from a YAML file (`--config`) with
//! individual CLI flags overriding file values.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::cli::ScanArgs;

pub const DEFAULT_SAMPLE_SIZE: usize = 10;
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 0.30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Folder whose direct `.xlsx` children are scanned.
    pub input_dir: PathBuf,
    /// Destination path for the two-sheet report workbook.
    pub report: PathBuf,
    /// Maximum inconsistent values inlined per Summary row; the full list is
    /// always written to the Inconsistent Values sheet.
    pub sample_size: usize,
    /// Tolerance around the average text length of numeric columns, as a
    /// fraction (0.30 allows lengths within ±30% of the average).
    pub length_tolerance: f64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            report: PathBuf::from("consistency_report.xlsx"),
            sample_size: DEFAULT_SAMPLE_SIZE,
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
        }
    }
}

impl AuditConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Opening configuration file {path:?}"))?;
        let reader = BufReader::new(file);
        let config: AuditConfig =
            serde_yaml::from_reader(reader).context("Parsing configuration YAML")?;
        config.ensure_valid()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating configuration file {path:?}"))?;
        serde_yaml::to_writer(file, self).context("Writing configuration YAML")
    }

    /// Resolves the effective configuration for a scan: YAML file defaults
    /// (when `--config` is given), overridden by any explicit flags.
    pub fn from_scan_args(args: &ScanArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                Self::load(path).with_context(|| format!("Loading configuration from {path:?}"))?
            }
            None => Self::default(),
        };
        if let Some(input_dir) = &args.input_dir {
            config.input_dir = input_dir.clone();
        }
        if let Some(report) = &args.report {
            config.report = report.clone();
        }
        if let Some(sample_size) = args.sample_size {
            config.sample_size = sample_size;
        }
        if let Some(tolerance) = args.length_tolerance {
            config.length_tolerance = tolerance;
        }
        config.ensure_valid()?;
        Ok(config)
    }

    pub fn ensure_valid(&self) -> Result<()> {
        ensure!(self.sample_size >= 1, "Sample size must be at least 1");
        ensure!(
            self.length_tolerance > 0.0 && self.length_tolerance < 1.0,
            "Length tolerance must be between 0 and 1 (exclusive), got {}",
            self.length_tolerance
        );
        Ok(())
    }
}
