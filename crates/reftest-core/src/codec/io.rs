//! Blob file management.
//!
//! Bridges the stream codec in [`super::format`] with the local filesystem.
//!
//! Saves are atomic: the blob is written and synced to a temporary sibling
//! file which is then renamed over the destination, so readers never observe
//! a half-written reference file. The temporary file is removed on every
//! error path. The destination directory must already exist.
//!
//! Files are never shared between concurrent callers; there is no locking.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::debug;
use snafu::{ResultExt, Snafu};

use super::format::{self, FormatError};
use super::{AnyVector, BlobHeader, CodecErrorKind};
use crate::float::Float;

/// Errors that can occur while saving or loading blob files.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CodecError {
    /// The source file could not be opened for reading.
    #[snafu(display("Failed to open file for reading: {path}"))]
    Open {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The destination (or its temporary sibling) could not be created.
    #[snafu(display("Failed to open file for writing: {path}"))]
    Create {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Flushing, syncing or renaming the written file failed.
    #[snafu(display("Error writing to file: {path}: {source}"))]
    Persist {
        /// Path being written.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Encoding or decoding the blob failed.
    #[snafu(display("{path}: {source}"))]
    Format {
        /// Path being read or written.
        path: String,
        /// Underlying codec error.
        source: FormatError,
    },
}

impl CodecError {
    /// Classify this error as an I/O, type or size failure.
    pub fn kind(&self) -> CodecErrorKind {
        match self {
            CodecError::Format {
                source: FormatError::TypeMismatch { .. },
                ..
            } => CodecErrorKind::TypeMismatch,
            CodecError::Format {
                source: FormatError::SizeMismatch { .. },
                ..
            } => CodecErrorKind::SizeMismatch,
            _ => CodecErrorKind::Io,
        }
    }

    /// Path the failed operation was working on.
    pub fn path(&self) -> &str {
        match self {
            CodecError::Open { path, .. }
            | CodecError::Create { path, .. }
            | CodecError::Persist { path, .. }
            | CodecError::Format { path, .. } => path,
        }
    }
}

/// Result alias for blob file operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Guard that removes a temporary file on drop unless disarmed.
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    /// Keep the file; call after a successful rename.
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed {
            // Best effort; the caller is already propagating another error.
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Save `data` as a blob at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CodecError::Create`] if the file cannot be opened for writing,
/// and [`CodecError::Format`] / [`CodecError::Persist`] if a write, sync or
/// the final rename fails. No partial file is left behind on failure.
pub fn save_vector<T: Float>(path: impl AsRef<Path>, data: &[T]) -> CodecResult<()> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let tmp_path = temp_path_for(path);
    let tmp_display = tmp_path.display().to_string();

    let mut guard = TempFileGuard::new(tmp_path.clone());
    {
        let file = File::create(&tmp_path).context(CreateSnafu {
            path: tmp_display.clone(),
        })?;
        let mut w = BufWriter::new(file);
        format::write_vector(&mut w, data).context(FormatSnafu {
            path: tmp_display.clone(),
        })?;
        let file = w
            .into_inner()
            .map_err(|e| e.into_error())
            .context(PersistSnafu {
                path: tmp_display.clone(),
            })?;
        file.sync_all().context(PersistSnafu { path: tmp_display })?;
    }

    fs::rename(&tmp_path, path).context(PersistSnafu {
        path: display.clone(),
    })?;
    guard.disarm();

    debug!("saved {} {} values to {display}", data.len(), T::TYPE_TAG);
    Ok(())
}

fn open_reader(path: &Path) -> CodecResult<BufReader<File>> {
    let file = File::open(path).context(OpenSnafu {
        path: path.display().to_string(),
    })?;
    Ok(BufReader::new(file))
}

/// Load a blob of `T` from `path`.
///
/// # Errors
///
/// Returns [`CodecError::Open`] if the file cannot be opened and
/// [`CodecError::Format`] if it is truncated, corrupt, or stores a different
/// element type or width (see [`CodecError::kind`]).
pub fn load_vector<T: Float>(path: impl AsRef<Path>) -> CodecResult<Vec<T>> {
    let path = path.as_ref();
    let mut r = open_reader(path)?;
    let data = format::read_vector::<_, T>(&mut r).context(FormatSnafu {
        path: path.display().to_string(),
    })?;
    debug!("loaded {} {} values from {}", data.len(), T::TYPE_TAG, path.display());
    Ok(data)
}

/// Load a blob from `path` using whichever element type its tag names.
pub fn load_any_vector(path: impl AsRef<Path>) -> CodecResult<AnyVector> {
    let path = path.as_ref();
    let mut r = open_reader(path)?;
    format::read_any_vector(&mut r).context(FormatSnafu {
        path: path.display().to_string(),
    })
}

/// Read only the header of the blob at `path`.
pub fn load_header(path: impl AsRef<Path>) -> CodecResult<BlobHeader> {
    let path = path.as_ref();
    let mut r = open_reader(path)?;
    format::read_header(&mut r).context(FormatSnafu {
        path: path.display().to_string(),
    })
}
