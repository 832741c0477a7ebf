use crate::error::SheetError;

use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_UPLOAD_DIR: &str = "uploaded_files";

/// Holds uploaded datasets and decides which one queries read.
pub trait DatasetStore {
    /// Copies `source` into the store and returns where it landed.
    fn store(&self, source: &Path) -> Result<PathBuf, SheetError>;

    /// The dataset queries should use, if any has been stored.
    fn latest(&self) -> Result<Option<PathBuf>, SheetError>;
}

/// A directory of uploads named `<unix-millis>_<original name>`.
///
/// `latest` is evaluated at call time, so a query racing an upload may see
/// either the previous file or the new one.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for UploadDir {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_DIR)
    }
}

impl DatasetStore for UploadDir {
    fn store(&self, source: &Path) -> Result<PathBuf, SheetError> {
        let name = source
            .file_name()
            .ok_or_else(|| SheetError::UnsupportedFormat {
                path: source.to_path_buf(),
            })?;

        fs::create_dir_all(&self.root)?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();

        let target = self
            .root
            .join(format!("{}_{}", millis, name.to_string_lossy()));
        fs::copy(source, &target)?;

        info!("Stored {} as {}", source.display(), target.display());
        Ok(target)
    }

    fn latest(&self) -> Result<Option<PathBuf>, SheetError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in entries {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }

            let candidate = (metadata.modified()?, entry.path());
            // Equal mtimes fall back to the name, whose prefix is the upload time
            if newest.as_ref().map_or(true, |current| candidate > *current) {
                newest = Some(candidate);
            }
        }

        if let Some((_, path)) = &newest {
            info!("Latest dataset is {}", path.display());
        }

        Ok(newest.map(|(_, path)| path))
    }
}
