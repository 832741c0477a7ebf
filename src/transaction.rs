use crate::engine::header::ColumnMap;
use crate::error::SheetError;
use crate::grid::Cell;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Clock text exactly as it appeared in the time column.
    pub time: String,
    pub amount: Decimal,
}

impl TransactionRecord {
    pub fn new(time: impl Into<String>, amount: Decimal) -> Self {
        Self {
            time: time.into(),
            amount,
        }
    }

    /// Builds a record from a data row, or `None` when the row is too short
    /// or its amount is not a number.
    pub fn from_row(row: &[Cell], columns: &ColumnMap) -> Option<Self> {
        if row.len() < columns.required_width() {
            return None;
        }

        let amount = parse_amount(&row[columns.amount])?;

        Some(Self {
            time: cell_text(&row[columns.time]),
            amount,
        })
    }
}

/// Amounts must fit a `Decimal` (magnitude below about 7.9e28); larger
/// values are treated like any other unreadable amount.
pub fn parse_amount(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(number) => Decimal::from_f64(*number),
        Cell::Text(text) => {
            let text = text.trim();
            if !is_plain_number(text) {
                return None;
            }
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .ok()
        }
        Cell::Empty => None,
    }
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one mantissa digit.
fn is_plain_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mantissa_ok = !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());

    let exponent_ok = exponent.map_or(true, |exponent| {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    });

    mantissa_ok && exponent_ok
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Number(number) => number.to_string(),
        Cell::Empty => String::new(),
    }
}

/// Answer to a time-window query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub start_time: String,
    pub end_time: String,
    pub matched: usize,
    pub total_amount: Decimal,
}

impl QueryResult {
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), SheetError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.serialize(self)?;
        wtr.flush()?;
        Ok(())
    }
}
