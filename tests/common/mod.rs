#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{Reader, Xlsx, open_workbook};
use rust_xlsxwriter::Workbook;
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates (if needed) and returns an input folder for workbooks.
    pub fn input_dir(&self) -> PathBuf {
        let dir = self.temp_dir.path().join("input");
        fs::create_dir_all(&dir).expect("create input dir");
        dir
    }

    /// Writes raw bytes into a file under the workspace and returns the path.
    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write file contents");
        path
    }
}

#[derive(Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

pub fn t(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

pub fn n(v: f64) -> Cell {
    Cell::Number(v)
}

/// Builds an .xlsx fixture with the given sheets; each sheet is a list of
/// rows, the first of which is the header row.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet().set_name(*name).expect("sheet name");
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(s) => {
                        sheet
                            .write_string(r as u32, c as u16, s)
                            .expect("write text cell");
                    }
                    Cell::Number(v) => {
                        sheet
                            .write_number(r as u32, c as u16, *v)
                            .expect("write number cell");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save(path).expect("save fixture workbook");
}

/// Reads a sheet of the generated report back as display strings.
pub fn read_sheet(path: &Path, name: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("open report workbook");
    let range = workbook.worksheet_range(name).expect("read report sheet");
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
