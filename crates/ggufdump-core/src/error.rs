use std::io;
use thiserror::Error;

/// Errors returned while decoding a GGUF document.
///
/// Any failure aborts the decode: the reader never substitutes defaults for
/// malformed input and never returns a partially built document.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GgufError {
    #[error("unexpected end of data at byte {offset}: need {needed} bytes, {remaining} remain")]
    Truncated { offset: usize, needed: usize, remaining: usize },

    #[error("bad magic: {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("unsupported GGUF version: {0}")]
    UnsupportedVersion(u32),

    #[error("{field} count {count} out of range (0..={max})")]
    CountOverflow { field: &'static str, count: i64, max: u64 },

    #[error("unknown metadata value type: {0}")]
    UnknownType(u32),

    #[error("unknown tensor type code: {0}")]
    UnknownTensorType(u32),

    #[error("negative array length: {0}")]
    NegativeCount(i64),

    #[error("negative tensor dimension: {0}")]
    InvalidShape(i64),

    #[error("arrays of arrays are not supported")]
    UnsupportedNesting,

    #[error("duplicate metadata key: {0:?}")]
    DuplicateKey(String),

    #[error("invalid alignment {0}: must be a non-zero power of two")]
    InvalidAlignment(i128),

    #[error("tensor {name:?}: offset {offset} is not a multiple of alignment {alignment}")]
    MisalignedTensor { name: String, offset: u64, alignment: u64 },

    #[error("tensor dimensionality {n_dims} exceeds the maximum of {max}")]
    DimensionalityOverflow { n_dims: u32, max: u32 },

    #[error("string too large: {0} bytes")]
    StringTooLarge(u64),

    #[error("metadata entry {index} ({key:?}) starting at byte {offset}: {source}")]
    MetadataEntry {
        index: u64,
        key: String,
        offset: usize,
        #[source]
        source: Box<GgufError>,
    },

    #[error("tensor entry {index} ({name:?}) starting at byte {offset}: {source}")]
    TensorEntry {
        index: u64,
        name: String,
        offset: usize,
        #[source]
        source: Box<GgufError>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GgufError>;
