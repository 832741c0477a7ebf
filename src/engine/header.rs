use crate::grid::{Cell, RawGrid};

pub const TIME_LABEL: &str = "Giờ";
pub const AMOUNT_LABEL: &str = "Thành tiền (VNĐ)";

/// A grid needs at least a header row and one data row.
pub const MIN_ROWS: usize = 2;

/// The literal column labels that identify the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLabels {
    pub time: String,
    pub amount: String,
}

impl HeaderLabels {
    pub fn new(time: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            amount: amount.into(),
        }
    }
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self::new(TIME_LABEL, AMOUNT_LABEL)
    }
}

/// Where the header row sits and which columns hold the time and amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub header_row: usize,
    pub time: usize,
    pub amount: usize,
}

impl ColumnMap {
    /// Minimum number of cells a data row needs to cover both columns.
    pub fn required_width(&self) -> usize {
        self.time.max(self.amount) + 1
    }
}

/// Index of the first row holding both labels, scanning from the top.
pub fn find_header_row(grid: &RawGrid, labels: &HeaderLabels) -> Option<usize> {
    if grid.len() < MIN_ROWS {
        return None;
    }

    grid.rows().iter().position(|row| {
        label_position(row, &labels.time).is_some()
            && label_position(row, &labels.amount).is_some()
    })
}

/// Locates the header row and maps both labels to their first column.
pub fn resolve_header(grid: &RawGrid, labels: &HeaderLabels) -> Option<ColumnMap> {
    let header_row = find_header_row(grid, labels)?;
    let row = &grid.rows()[header_row];

    Some(ColumnMap {
        header_row,
        time: label_position(row, &labels.time)?,
        amount: label_position(row, &labels.amount)?,
    })
}

fn label_position(row: &[Cell], label: &str) -> Option<usize> {
    row.iter().position(|cell| cell.as_text() == Some(label))
}
