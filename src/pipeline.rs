use crate::engine::engine::{extract_with, in_window, sum, Engine};
use crate::engine::window::{format_clock, TimeWindow};
use crate::error::SheetError;
use crate::grid::load_grid;
use crate::transaction::{QueryResult, TransactionRecord};

use log::{debug, info};
use std::path::PathBuf;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 100;

/// Runs a window query over `path`, streaming records from a blocking reader
/// task to the aggregating loop. Produces the same result as `Engine::query`.
pub async fn stream_query(
    engine: Engine,
    path: PathBuf,
    window: TimeWindow,
) -> Result<QueryResult, SheetError> {
    info!(
        "Querying {} from {} to {}",
        path.display(),
        format_clock(window.start),
        format_clock(window.end)
    );

    let (tx_channel, mut rx) = mpsc::channel::<TransactionRecord>(CHANNEL_CAPACITY);

    let reader = tokio::task::spawn_blocking(move || -> Result<(), SheetError> {
        let grid = load_grid(&path)?;

        let Some(columns) = engine.resolve_header(&grid) else {
            debug!("No header row in {}", path.display());
            return Ok(());
        };
        debug!(
            "Header at row {}, time column {}, amount column {}",
            columns.header_row, columns.time, columns.amount
        );

        for record in extract_with(&grid, &columns) {
            if tx_channel.blocking_send(record).is_err() {
                break;
            }
        }

        Ok(())
    });

    let mut extracted = 0;
    let mut matched = Vec::new();
    while let Some(record) = rx.recv().await {
        extracted += 1;
        if in_window(&record, &window) {
            matched.push(record);
        }
    }

    reader.await??;
    debug!("{} of {} records in window", matched.len(), extracted);

    Ok(QueryResult {
        start_time: format_clock(window.start),
        end_time: format_clock(window.end),
        matched: matched.len(),
        total_amount: sum(&matched),
    })
}
