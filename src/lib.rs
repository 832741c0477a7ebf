pub mod engine;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod storage;
pub mod transaction;

pub use crate::engine::engine::{filter_by_window, sum, Engine};
pub use crate::engine::header::{ColumnMap, HeaderLabels};
pub use crate::engine::window::TimeWindow;
pub use crate::error::SheetError;
pub use crate::grid::{load_grid, Cell, RawGrid};
pub use crate::pipeline::stream_query;
pub use crate::storage::{DatasetStore, UploadDir};
pub use crate::transaction::{QueryResult, TransactionRecord};

use std::path::{Path, PathBuf};

/// Loads `path` and checks it has a usable header row.
pub fn validate_file<P: AsRef<Path>>(engine: &Engine, path: P) -> Result<bool, SheetError> {
    let grid = load_grid(path)?;
    Ok(engine.validate_structure(&grid))
}

/// Loads `path` and extracts every well-formed transaction record.
pub fn extract_file<P: AsRef<Path>>(
    engine: &Engine,
    path: P,
) -> Result<Vec<TransactionRecord>, SheetError> {
    let grid = load_grid(path)?;
    Ok(engine.extract(&grid))
}

/// Validates `source` and, only if its structure is sound, copies it into the store.
pub fn upload<S: DatasetStore>(
    engine: &Engine,
    store: &S,
    source: &Path,
) -> Result<PathBuf, SheetError> {
    if !validate_file(engine, source)? {
        return Err(SheetError::InvalidStructure {
            path: source.to_path_buf(),
            time_label: engine.labels().time.clone(),
            amount_label: engine.labels().amount.clone(),
        });
    }

    store.store(source)
}
