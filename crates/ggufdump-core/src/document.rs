//! Whole-document decoding.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cursor::ByteCursor;
use crate::error::{GgufError, Result};
use crate::layout;
use crate::metadata::GgufMetadata;
use crate::tensor::GgufTensorInfo;

/// The four-byte magic that every GGUF file starts with.
pub const GGUF_MAGIC: [u8; 4] = *b"GGUF";
/// Minimum supported GGUF version.
pub const GGUF_VERSION_MIN: u32 = 2;
/// Maximum supported GGUF version (inclusive).
pub const GGUF_VERSION_MAX: u32 = 3;
/// Most tensors a header may declare.
pub const MAX_TENSOR_COUNT: u64 = 1 << 20;
/// Most metadata entries a header may declare.
pub const MAX_METADATA_COUNT: u64 = 1 << 20;

/// Parsed GGUF file header.
///
/// The counts are signed on the wire; negative or implausibly large values
/// are rejected during decode, so they are unsigned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GgufHeader {
    pub version: u32,
    pub tensor_count: u64,
    pub metadata_count: u64,
}

impl GgufHeader {
    /// Decode and validate the fixed header at the cursor.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let bytes = cursor.read_bytes(4)?;
        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != GGUF_MAGIC {
            return Err(GgufError::BadMagic(magic));
        }

        let version = cursor.read_u32()?;
        if !(GGUF_VERSION_MIN..=GGUF_VERSION_MAX).contains(&version) {
            return Err(GgufError::UnsupportedVersion(version));
        }

        let tensor_count = read_count(cursor, "tensor", MAX_TENSOR_COUNT)?;
        let metadata_count = read_count(cursor, "metadata", MAX_METADATA_COUNT)?;

        Ok(Self { version, tensor_count, metadata_count })
    }
}

fn read_count(cursor: &mut ByteCursor<'_>, field: &'static str, max: u64) -> Result<u64> {
    let count = cursor.read_i64()?;
    if count < 0 || count as u64 > max {
        return Err(GgufError::CountOverflow { field, count, max });
    }
    Ok(count as u64)
}

/// A fully decoded GGUF document: header, metadata dictionary, tensor
/// index, and the resolved start of the data segment.
///
/// Decoding is all-or-nothing; a value of this type always satisfies every
/// structural invariant (counts match the header, tensor offsets are
/// aligned, `data_start` is aligned).
#[derive(Debug, Clone, Serialize)]
pub struct GgufDocument {
    pub header: GgufHeader,
    pub metadata: GgufMetadata,
    /// Tensor descriptors in file order.
    pub tensors: Vec<GgufTensorInfo>,
    /// Alignment in force for the data segment.
    pub alignment: u64,
    /// Absolute byte offset where the data segment begins.
    pub data_start: u64,
}

impl GgufDocument {
    /// Decode a complete document from an in-memory byte slice.
    ///
    /// The slice only needs to cover the structural portion of the file;
    /// tensor payload bytes past `data_start` are never touched.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        let header = GgufHeader::decode(&mut cursor)?;
        debug!(
            version = header.version,
            tensors = header.tensor_count,
            metadata = header.metadata_count,
            "decoded GGUF header"
        );

        let metadata = GgufMetadata::decode(&mut cursor, header.metadata_count)?;
        let tensors = GgufTensorInfo::decode_table(&mut cursor, header.tensor_count)?;

        let alignment = layout::resolve_alignment(&metadata)?;
        let data_start = layout::align_up(cursor.position() as u64, alignment)?;
        layout::validate_tensor_offsets(&tensors, alignment)?;

        debug!(alignment, data_start, "resolved data segment");
        Ok(Self { header, metadata, tensors, alignment, data_start })
    }

    /// Memory-map `path` and decode it.
    ///
    /// The mapping is released on return; the document owns all of its
    /// data and reports where each tensor's payload lives rather than
    /// holding the payload bytes.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        // SAFETY: read-only mapping of a file we never mutate.
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Self::decode(&mmap)
    }
}

/// Returns `true` if `data` starts with the GGUF magic bytes.
#[inline]
pub fn check_magic(data: &[u8]) -> bool {
    data.get(0..4) == Some(b"GGUF")
}

/// Read the GGUF version field from the first 8 bytes.
///
/// Returns `None` if the slice is too short or the magic is invalid. The
/// value is not range-checked; [`GgufDocument::decode`] is.
pub fn read_version(data: &[u8]) -> Option<u32> {
    if data.len() < 8 || !check_magic(data) {
        return None;
    }
    Some(u32::from_le_bytes([data[4], data[5], data[6], data[7]]))
}
