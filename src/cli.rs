use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Audit spreadsheet folders for value consistency", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a folder of .xlsx workbooks and write a two-sheet consistency report
    Scan(ScanArgs),
    /// Write a default YAML configuration template
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Folder containing the .xlsx workbooks to scan (not traversed recursively)
    #[arg(short = 'i', long = "input-dir")]
    pub input_dir: Option<PathBuf>,
    /// Destination .xlsx report path
    #[arg(short = 'o', long = "report")]
    pub report: Option<PathBuf>,
    /// Maximum inconsistent values shown inline per Summary row
    #[arg(long = "sample-size")]
    pub sample_size: Option<usize>,
    /// Length tolerance for numeric columns, as a fraction of the average text length
    #[arg(long = "length-tolerance")]
    pub length_tolerance: Option<f64>,
    /// YAML configuration file supplying defaults for the flags above
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Destination path for the YAML template
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}
