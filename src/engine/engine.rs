use crate::engine::header::{self, ColumnMap, HeaderLabels};
use crate::engine::window::{format_clock, parse_clock, TimeWindow};
use crate::grid::RawGrid;
use crate::transaction::{QueryResult, TransactionRecord};

use rust_decimal::Decimal;

/// Extracts and aggregates point-of-sale records from a grid.
///
/// The engine holds no state between calls besides the header labels it
/// searches for; every method is a pure function of its arguments.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    labels: HeaderLabels,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(labels: HeaderLabels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &HeaderLabels {
        &self.labels
    }

    /// Cheap pre-check: does the grid contain a header row with both labels?
    pub fn validate_structure(&self, grid: &RawGrid) -> bool {
        header::find_header_row(grid, &self.labels).is_some()
    }

    pub fn resolve_header(&self, grid: &RawGrid) -> Option<ColumnMap> {
        header::resolve_header(grid, &self.labels)
    }

    /// Every well-formed data row after the header, in source order.
    /// Malformed rows are dropped; a grid without a header yields nothing.
    pub fn extract(&self, grid: &RawGrid) -> Vec<TransactionRecord> {
        match self.resolve_header(grid) {
            Some(columns) => extract_with(grid, &columns),
            None => Vec::new(),
        }
    }

    pub fn query(&self, grid: &RawGrid, window: &TimeWindow) -> QueryResult {
        let records = self.extract(grid);
        let matched = filter_by_window(&records, window);

        QueryResult {
            start_time: format_clock(window.start),
            end_time: format_clock(window.end),
            matched: matched.len(),
            total_amount: sum(&matched),
        }
    }
}

pub fn extract_with(grid: &RawGrid, columns: &ColumnMap) -> Vec<TransactionRecord> {
    grid.rows()
        .iter()
        .skip(columns.header_row + 1)
        .filter_map(|row| TransactionRecord::from_row(row, columns))
        .collect()
}

/// Keeps records whose time parses and lies in the closed window, preserving order.
pub fn filter_by_window(records: &[TransactionRecord], window: &TimeWindow) -> Vec<TransactionRecord> {
    records
        .iter()
        .filter(|record| in_window(record, window))
        .cloned()
        .collect()
}

pub fn in_window(record: &TransactionRecord, window: &TimeWindow) -> bool {
    parse_clock(&record.time).is_some_and(|time| window.contains(time))
}

pub fn sum(records: &[TransactionRecord]) -> Decimal {
    records.iter().map(|record| record.amount).sum()
}
