//! Generate-or-load provider for named reference series.
//!
//! A regression workflow runs in one of two modes:
//!
//! - **generate**: the reference is derived from the current run (optionally
//!   shifted by a constant offset, which is how synthetic min/max bounds are
//!   produced) and written to `<dir>/<name>.bin`;
//! - **verify**: the stored reference is loaded and the current run is
//!   checked against it.
//!
//! The mode and directory come from a [`ReferenceConfig`], which can be
//! deserialized with serde or read from the `REFTEST_MODE` and `REFTEST_DIR`
//! environment variables.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

use crate::codec::{self, CodecError};
use crate::float::Float;

/// Environment variable selecting the [`ReferenceMode`].
pub const MODE_ENV: &str = "REFTEST_MODE";
/// Environment variable selecting the reference directory.
pub const DIR_ENV: &str = "REFTEST_DIR";

const REFERENCE_EXTENSION: &str = "bin";

/// Whether references are produced from the current run or read back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceMode {
    /// Derive references from the current run and write them to disk.
    Generate,
    /// Load previously written references.
    #[default]
    Verify,
}

/// Errors produced when parsing a [`ReferenceMode`] from text.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum ParseReferenceModeError {
    /// The string names neither mode.
    #[snafu(display("unknown reference mode '{input}' (expected 'generate' or 'verify')"))]
    Unknown {
        /// The rejected input.
        input: String,
    },
}

impl FromStr for ReferenceMode {
    type Err = ParseReferenceModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generate" | "gen" => Ok(ReferenceMode::Generate),
            "verify" | "check" => Ok(ReferenceMode::Verify),
            _ => Err(ParseReferenceModeError::Unknown {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceMode::Generate => f.write_str("generate"),
            ReferenceMode::Verify => f.write_str("verify"),
        }
    }
}

/// Where references live and whether they are being generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Generate or verify.
    pub mode: ReferenceMode,
    /// Directory holding `<name>.bin` reference blobs.
    pub dir: PathBuf,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            mode: ReferenceMode::Verify,
            dir: PathBuf::from("."),
        }
    }
}

impl ReferenceConfig {
    /// Build a config from explicit values.
    pub fn new(mode: ReferenceMode, dir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            dir: dir.into(),
        }
    }

    /// Read `REFTEST_MODE` and `REFTEST_DIR` from the process environment.
    ///
    /// Unset or empty variables fall back to the defaults (verify, current
    /// directory).
    pub fn from_env() -> Result<Self, ReferenceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ReferenceConfig::from_env`], with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReferenceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(MODE_ENV).filter(|m| !m.trim().is_empty()) {
            config.mode = raw.parse::<ReferenceMode>().context(InvalidModeSnafu)?;
        }
        if let Some(dir) = lookup(DIR_ENV).filter(|d| !d.is_empty()) {
            config.dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}

/// Errors from the reference store.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReferenceError {
    /// `REFTEST_MODE` (or a config value) is not a known mode.
    #[snafu(display("Invalid REFTEST_MODE: {source}"))]
    InvalidMode {
        /// Underlying parse error.
        source: ParseReferenceModeError,
    },

    /// Reference names must be a single non-empty path component.
    #[snafu(display("Invalid reference name '{name}'"))]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// The reference directory could not be created.
    #[snafu(display("Failed to create reference directory: {path}"))]
    CreateDir {
        /// Directory path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Saving or loading the reference blob failed.
    #[snafu(display("Reference '{name}': {source}"))]
    Codec {
        /// Reference name.
        name: String,
        /// Underlying codec error.
        source: CodecError,
    },
}

/// Reads and writes named references under one directory.
#[derive(Clone, Debug)]
pub struct ReferenceStore {
    config: ReferenceConfig,
}

impl ReferenceStore {
    /// Create a store for `config`.
    pub fn new(config: ReferenceConfig) -> Self {
        Self { config }
    }

    /// Create a store configured from the environment.
    pub fn from_env() -> Result<Self, ReferenceError> {
        ReferenceConfig::from_env().map(Self::new)
    }

    /// Active configuration.
    pub fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    /// True in [`ReferenceMode::Generate`]. Callers usually skip their
    /// assertions while generating.
    pub fn is_generating(&self) -> bool {
        self.config.mode == ReferenceMode::Generate
    }

    /// File path used for reference `name`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, ReferenceError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && Path::new(name).components().count() == 1;
        if !valid {
            return InvalidNameSnafu { name }.fail();
        }
        Ok(self
            .config
            .dir
            .join(format!("{name}.{REFERENCE_EXTENSION}")))
    }

    /// Produce or fetch reference `name`.
    ///
    /// In generate mode the reference is `values[i] + offset`; it is written
    /// to disk and returned. In verify mode the stored reference is loaded
    /// and returned, and `values` / `offset` are ignored.
    pub fn reference<T: Float>(
        &self,
        name: &str,
        values: &[T],
        offset: T,
    ) -> Result<Vec<T>, ReferenceError> {
        match self.config.mode {
            ReferenceMode::Generate => {
                let adjusted: Vec<T> = values.iter().map(|&v| v + offset).collect();
                self.store(name, &adjusted)?;
                Ok(adjusted)
            }
            ReferenceMode::Verify => self.load(name),
        }
    }

    /// Write `values` as reference `name`, creating the directory if needed.
    pub fn store<T: Float>(&self, name: &str, values: &[T]) -> Result<(), ReferenceError> {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(&self.config.dir).context(CreateDirSnafu {
            path: self.config.dir.display().to_string(),
        })?;
        codec::save_vector(&path, values).context(CodecSnafu { name })?;
        info!(
            "generated reference '{name}' ({} values) at {}",
            values.len(),
            path.display()
        );
        Ok(())
    }

    /// Load reference `name`.
    pub fn load<T: Float>(&self, name: &str) -> Result<Vec<T>, ReferenceError> {
        let path = self.path_for(name)?;
        codec::load_vector(&path).context(CodecSnafu { name })
    }
}
