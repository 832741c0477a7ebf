use crate::error::SheetError;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveTime;
use csv::ReaderBuilder;
use log::debug;
use std::fs::File;
use std::path::Path;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A single spreadsheet value, reduced to the two kinds the engine cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<f64> for Cell {
    fn from(number: f64) -> Self {
        Cell::Number(number)
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(text) => Cell::Text(text.clone()),
            Data::Int(number) => Cell::Number(*number as f64),
            Data::Float(number) => Cell::Number(*number),
            Data::Bool(flag) => Cell::Text(flag.to_string()),
            // Time-formatted cells are stored as fractional days
            Data::DateTime(serial) => Cell::Text(clock_text(serial.as_f64())),
            Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
            Data::Error(error) => Cell::Text(error.to_string()),
        }
    }
}

/// Rows of cells exactly as read from the first sheet of a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
}

impl RawGrid {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Builds a grid where every value is a text cell.
    pub fn from_text_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|value| Cell::Text(value.into())).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, SheetError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(SourceFormat::Workbook),
            Some("csv") => Ok(SourceFormat::Csv),
            _ => Err(SheetError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Reads the first sheet of a workbook, or a whole CSV file, into a grid.
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<RawGrid, SheetError> {
    let path = path.as_ref();

    let grid = match SourceFormat::from_path(path)? {
        SourceFormat::Workbook => read_workbook(path)?,
        SourceFormat::Csv => read_csv(path)?,
    };

    debug!("Loaded {} rows from {}", grid.len(), path.display());
    Ok(grid)
}

fn read_workbook(path: &Path) -> Result<RawGrid, SheetError> {
    let malformed = |reason: String| SheetError::MalformedFile {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = match open_workbook_auto(path) {
        Ok(workbook) => workbook,
        Err(calamine::Error::Io(e)) => return Err(SheetError::Io(e)),
        Err(e) => return Err(malformed(e.to_string())),
    };

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => return Err(malformed(e.to_string())),
        None => return Err(malformed("workbook has no sheets".to_string())),
    };

    let rows = range
        .rows()
        .map(|row| {
            let mut cells: Vec<Cell> = row.iter().map(Cell::from).collect();
            trim_trailing_empty(&mut cells);
            cells
        })
        .collect();

    Ok(RawGrid::from_rows(rows))
}

fn read_csv(path: &Path) -> Result<RawGrid, SheetError> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| SheetError::MalformedFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        rows.push(record.iter().map(Cell::from).collect());
    }

    Ok(RawGrid::from_rows(rows))
}

fn trim_trailing_empty(cells: &mut Vec<Cell>) {
    while cells.last().is_some_and(Cell::is_empty) {
        cells.pop();
    }
}

fn clock_text(serial: f64) -> String {
    let seconds = (serial.rem_euclid(1.0) * SECONDS_PER_DAY).round() as u32 % 86_400;

    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
