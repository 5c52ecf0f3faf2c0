//! Encoding and decoding of vector blobs over byte streams.
//!
//! These helpers know nothing about files; [`super::io`] adds path handling
//! on top of them. Decoding validates the header before touching the
//! payload: a tag mismatch is reported before a size mismatch, and a payload
//! length that cannot fit in memory is rejected before allocating.

use std::io::{Cursor, Read, Write};

use snafu::{ResultExt, Snafu};

use super::{AnyVector, BlobHeader, MAX_TYPE_TAG_LEN};
use crate::float::Float;

/// Errors that can occur while encoding or decoding a blob.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FormatError {
    /// The underlying writer failed.
    #[snafu(display("Failed to write vector blob: {source}"))]
    Serialize {
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The underlying reader failed or ended early.
    #[snafu(display("Failed to read vector blob: {source}"))]
    Deserialize {
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The stored type tag is not the requested element type.
    #[snafu(display("Type mismatch: blob contains {stored}, requested {requested}"))]
    TypeMismatch {
        /// Tag found in the blob.
        stored: String,
        /// Tag of the requested element type.
        requested: &'static str,
    },

    /// The stored element width is not the requested type's width.
    #[snafu(display("Element size mismatch: blob stores {stored}-byte elements, requested {requested}"))]
    SizeMismatch {
        /// Width found in the blob.
        stored: u64,
        /// Width of the requested element type.
        requested: usize,
    },

    /// The stored tag is too long, not UTF-8, or names an unknown type.
    #[snafu(display("Invalid type tag: {reason}"))]
    InvalidTag {
        /// Why the tag was rejected.
        reason: String,
    },

    /// `element_count * element_size` does not fit in addressable memory.
    #[snafu(display(
        "Declared payload of {element_count} x {element_size} bytes is too large"
    ))]
    PayloadTooLarge {
        /// Declared number of elements.
        element_count: u64,
        /// Declared element width.
        element_size: u64,
    },
}

/// Result alias for blob encoding and decoding.
pub type FormatResult<T> = Result<T, FormatError>;

fn write_u64<W: Write>(w: &mut W, v: u64) -> FormatResult<()> {
    w.write_all(&v.to_le_bytes()).context(SerializeSnafu)
}

fn read_u64<R: Read>(r: &mut R) -> FormatResult<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf).context(DeserializeSnafu)?;
    Ok(u64::from_le_bytes(buf))
}

/// Encode `data` as a blob into `w`.
///
/// # Errors
///
/// Returns [`FormatError::Serialize`] if the writer fails.
pub fn write_vector<W: Write, T: Float>(w: &mut W, data: &[T]) -> FormatResult<()> {
    let tag = T::TYPE_TAG.as_bytes();
    write_u64(w, tag.len() as u64)?;
    w.write_all(tag).context(SerializeSnafu)?;
    write_u64(w, T::SIZE as u64)?;
    write_u64(w, data.len() as u64)?;

    let mut payload = Vec::with_capacity(data.len() * T::SIZE);
    for &v in data {
        v.extend_le_bytes(&mut payload);
    }
    w.write_all(&payload).context(SerializeSnafu)?;
    w.flush().context(SerializeSnafu)
}

/// A type tag as found in the stream, before it is trusted.
enum StoredTag {
    Text(String),
    /// Not UTF-8; holds a lossy rendering for messages.
    NotUtf8(String),
    /// Longer than [`MAX_TYPE_TAG_LEN`]; the bytes are never read.
    TooLong(u64),
}

impl StoredTag {
    fn describe(&self) -> String {
        match self {
            StoredTag::Text(tag) => tag.clone(),
            StoredTag::NotUtf8(lossy) => format!("non-UTF-8 tag {lossy:?}"),
            StoredTag::TooLong(len) => format!("{len}-byte tag"),
        }
    }

    fn into_text(self) -> FormatResult<String> {
        match self {
            StoredTag::Text(tag) => Ok(tag),
            StoredTag::NotUtf8(lossy) => InvalidTagSnafu {
                reason: format!("tag is not UTF-8: {lossy:?}"),
            }
            .fail(),
            StoredTag::TooLong(len) => InvalidTagSnafu {
                reason: format!("tag length {len} exceeds {MAX_TYPE_TAG_LEN}"),
            }
            .fail(),
        }
    }
}

fn read_tag<R: Read>(r: &mut R) -> FormatResult<StoredTag> {
    let tag_len = read_u64(r)?;
    // Allocation guard only; no valid tag comes close.
    if tag_len > MAX_TYPE_TAG_LEN {
        return Ok(StoredTag::TooLong(tag_len));
    }

    let mut tag = vec![0u8; tag_len as usize];
    r.read_exact(&mut tag).context(DeserializeSnafu)?;
    Ok(match String::from_utf8(tag) {
        Ok(text) => StoredTag::Text(text),
        Err(e) => StoredTag::NotUtf8(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    })
}

fn read_counts<R: Read>(r: &mut R, type_tag: String) -> FormatResult<BlobHeader> {
    let element_size = read_u64(r)?;
    let element_count = read_u64(r)?;
    Ok(BlobHeader {
        type_tag,
        element_size,
        element_count,
    })
}

/// Decode only the header of a blob, leaving `r` positioned at the payload.
///
/// # Errors
///
/// Returns [`FormatError::Deserialize`] on a short read and
/// [`FormatError::InvalidTag`] when the tag is implausibly long or not UTF-8.
pub fn read_header<R: Read>(r: &mut R) -> FormatResult<BlobHeader> {
    let type_tag = read_tag(r)?.into_text()?;
    read_counts(r, type_tag)
}

/// Read exactly the payload announced by `header`.
fn read_payload<R: Read>(r: &mut R, header: &BlobHeader) -> FormatResult<Vec<u8>> {
    let len = header
        .payload_len()
        .filter(|len| usize::try_from(*len).is_ok())
        .ok_or(FormatError::PayloadTooLarge {
            element_count: header.element_count,
            element_size: header.element_size,
        })?;

    // Grow with the data actually present instead of trusting the header.
    let mut payload = Vec::new();
    r.take(len).read_to_end(&mut payload).context(DeserializeSnafu)?;
    if (payload.len() as u64) < len {
        return Err(FormatError::Deserialize {
            source: std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("payload truncated: expected {len} bytes, found {}", payload.len()),
            ),
        });
    }
    Ok(payload)
}

fn decode_payload<T: Float>(payload: &[u8]) -> Vec<T> {
    payload
        .chunks_exact(T::SIZE)
        .filter_map(T::from_le_chunk)
        .collect()
}

fn check_header<T: Float>(header: &BlobHeader) -> FormatResult<()> {
    if header.type_tag != T::TYPE_TAG {
        return TypeMismatchSnafu {
            stored: header.type_tag.clone(),
            requested: T::TYPE_TAG,
        }
        .fail();
    }
    if header.element_size != T::SIZE as u64 {
        return SizeMismatchSnafu {
            stored: header.element_size,
            requested: T::SIZE,
        }
        .fail();
    }
    Ok(())
}

/// Decode a blob of `T` from `r`.
///
/// # Errors
///
/// - [`FormatError::TypeMismatch`] when the tag is not `T`'s tag, including
///   tags that are not UTF-8 or are implausibly long.
/// - [`FormatError::SizeMismatch`] when the element width is not `T`'s.
/// - [`FormatError::Deserialize`] on a short read.
/// - [`FormatError::PayloadTooLarge`] on a corrupt element count.
pub fn read_vector<R: Read, T: Float>(r: &mut R) -> FormatResult<Vec<T>> {
    let type_tag = match read_tag(r)? {
        StoredTag::Text(tag) => tag,
        other => {
            return TypeMismatchSnafu {
                stored: other.describe(),
                requested: T::TYPE_TAG,
            }
            .fail();
        }
    };
    let header = read_counts(r, type_tag)?;
    check_header::<T>(&header)?;
    let payload = read_payload(r, &header)?;
    Ok(decode_payload(&payload))
}

/// Decode a blob whose element type is chosen by its stored tag.
///
/// # Errors
///
/// Returns [`FormatError::InvalidTag`] for tags other than `"f32"` and
/// `"f64"`, plus every error of [`read_vector`].
pub fn read_any_vector<R: Read>(r: &mut R) -> FormatResult<AnyVector> {
    let header = read_header(r)?;
    if header.type_tag == <f32 as Float>::TYPE_TAG {
        check_header::<f32>(&header)?;
        let payload = read_payload(r, &header)?;
        Ok(AnyVector::F32(decode_payload(&payload)))
    } else if header.type_tag == <f64 as Float>::TYPE_TAG {
        check_header::<f64>(&header)?;
        let payload = read_payload(r, &header)?;
        Ok(AnyVector::F64(decode_payload(&payload)))
    } else {
        InvalidTagSnafu {
            reason: format!("unknown element type {:?}", header.type_tag),
        }
        .fail()
    }
}

/// Encode `data` into an in-memory blob.
pub fn vector_to_bytes<T: Float>(data: &[T]) -> FormatResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut w = Cursor::new(&mut out);
        write_vector(&mut w, data)?;
    }
    Ok(out)
}

/// Decode an in-memory blob produced by [`vector_to_bytes`].
pub fn vector_from_bytes<T: Float>(bytes: &[u8]) -> FormatResult<Vec<T>> {
    let mut r = Cursor::new(bytes);
    read_vector(&mut r)
}
