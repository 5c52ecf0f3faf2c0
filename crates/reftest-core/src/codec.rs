//! Self-describing binary blobs for persisting reference vectors.
//!
//! A blob stores one homogeneous vector of `f32` or `f64` values together
//! with enough metadata to refuse loading it as the wrong element type.
//!
//! # Layout
//!
//! All integers are unsigned 64-bit little-endian; floating-point payload
//! elements are little-endian IEEE-754.
//!
//! ```text
//! +-----------------+-----------------+
//! | type_tag_length | u64             |
//! | type_tag        | UTF-8 bytes     |  "f32" or "f64"
//! | element_size    | u64             |  4 or 8
//! | element_count   | u64             |
//! | payload         | count * size    |
//! +-----------------+-----------------+
//! ```
//!
//! The format has no version field and no compression. The tag is a stable
//! name rather than a compiler type id, so blobs written by one build load
//! in any other.
//!
//! - [`format`] encodes and decodes blobs over any `Read` / `Write`.
//! - [`io`] saves and loads blob files, replacing files atomically.

pub mod format;
pub mod io;

pub use format::{
    FormatError, read_any_vector, read_header, read_vector, vector_from_bytes, vector_to_bytes,
    write_vector,
};
pub use io::{CodecError, load_any_vector, load_header, load_vector, save_vector};

/// Upper bound on the stored tag length accepted when decoding.
pub const MAX_TYPE_TAG_LEN: u64 = 64;

/// Metadata stored in front of every blob payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobHeader {
    /// Element type tag, for example `"f64"`.
    pub type_tag: String,
    /// Width of one element in bytes.
    pub element_size: u64,
    /// Number of elements in the payload.
    pub element_count: u64,
}

impl BlobHeader {
    /// Payload length in bytes, or `None` if it overflows `u64`.
    pub fn payload_len(&self) -> Option<u64> {
        self.element_count.checked_mul(self.element_size)
    }
}

/// A decoded vector whose element type was taken from the blob's tag.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyVector {
    /// Single-precision payload.
    F32(Vec<f32>),
    /// Double-precision payload.
    F64(Vec<f64>),
}

impl AnyVector {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            AnyVector::F32(v) => v.len(),
            AnyVector::F64(v) => v.len(),
        }
    }

    /// True when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored element type tag.
    pub fn type_tag(&self) -> &'static str {
        match self {
            AnyVector::F32(_) => "f32",
            AnyVector::F64(_) => "f64",
        }
    }

    /// Widen to `f64`. Single-precision values convert exactly.
    pub fn into_f64(self) -> Vec<f64> {
        match self {
            AnyVector::F32(v) => v.into_iter().map(f64::from).collect(),
            AnyVector::F64(v) => v,
        }
    }
}

/// Coarse classification of codec failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorKind {
    /// The file could not be opened, created, read or written completely.
    Io,
    /// The stored element type differs from the requested one.
    TypeMismatch,
    /// The stored element width differs from the requested type's width.
    SizeMismatch,
}
