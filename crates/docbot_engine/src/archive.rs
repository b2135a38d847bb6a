use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use docbot_logging::docbot_info;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("cannot use {path} as contract folder: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("refusing to save contract as {0:?}")]
    InvalidFilename(String),
    #[error("writing contract failed: {0}")]
    Io(#[from] io::Error),
}

/// Downloaded contracts, one file per name; saving again replaces the file.
#[derive(Debug, Clone)]
pub struct ContractArchive {
    dir: PathBuf,
}

impl ContractArchive {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writes `text` to `<dir>/<filename>` through a sibling temp file, so a
    /// reader never sees a half-written contract.
    pub fn save(&self, filename: &str, text: &str) -> Result<PathBuf, ArchiveError> {
        if !is_plain_name(filename) {
            return Err(ArchiveError::InvalidFilename(filename.to_string()));
        }
        open_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(text.as_bytes())?;
        staged.as_file().sync_all()?;

        let target = self.dir.join(filename);
        staged
            .persist(&target)
            .map_err(|err| ArchiveError::Io(err.error))?;
        docbot_info!("saved contract to {}", target.display());
        Ok(target)
    }
}

fn is_plain_name(filename: &str) -> bool {
    !matches!(filename, "" | "." | "..") && !filename.contains(['/', '\\'])
}

fn open_dir(dir: &Path) -> Result<(), ArchiveError> {
    let failed = |reason: String| ArchiveError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };
    fs::create_dir_all(dir).map_err(|err| failed(err.to_string()))?;
    // create_dir_all accepts an existing path without checking its type.
    if !dir.is_dir() {
        return Err(failed("not a directory".to_string()));
    }
    Ok(())
}
