//! Data-segment layout: alignment resolution and tensor-offset validation.

use crate::error::{GgufError, Result};
use crate::metadata::GgufMetadata;
use crate::tensor::GgufTensorInfo;

/// Alignment in force when the metadata does not override it.
pub const DEFAULT_ALIGNMENT: u64 = 32;

/// Well-known metadata key carrying the data-segment alignment.
pub const ALIGNMENT_KEY: &str = "general.alignment";

/// Round `offset` up to the next multiple of `alignment`.
pub fn align_up(offset: u64, alignment: u64) -> Result<u64> {
    if alignment == 0 || !alignment.is_power_of_two() {
        return Err(GgufError::InvalidAlignment(alignment as i128));
    }
    let mask = alignment - 1;
    Ok((offset + mask) & !mask)
}

/// Alignment for a document: `general.alignment` when present with an
/// integer type, otherwise [`DEFAULT_ALIGNMENT`].
///
/// A `general.alignment` entry of non-integer type is ignored (real writers
/// only emit integer types here); an integer value that is zero, negative,
/// or not a power of two is an error.
pub fn resolve_alignment(metadata: &GgufMetadata) -> Result<u64> {
    let Some(value) = metadata.get(ALIGNMENT_KEY) else {
        return Ok(DEFAULT_ALIGNMENT);
    };

    let requested = if let Some(v) = value.as_u64() {
        v
    } else if let Some(v) = value.as_i64() {
        if v < 0 {
            return Err(GgufError::InvalidAlignment(v as i128));
        }
        v as u64
    } else {
        tracing::warn!(
            key = ALIGNMENT_KEY,
            "alignment metadata has a non-integer type; using the default"
        );
        return Ok(DEFAULT_ALIGNMENT);
    };

    if requested == 0 || !requested.is_power_of_two() {
        return Err(GgufError::InvalidAlignment(requested as i128));
    }
    Ok(requested)
}

/// Check that every descriptor's offset is a multiple of `alignment`.
///
/// Whether `offset + data_size` stays inside the file is deferred to the
/// caller that maps the data segment; the total size is not known here.
pub fn validate_tensor_offsets(tensors: &[GgufTensorInfo], alignment: u64) -> Result<()> {
    if alignment == 0 || !alignment.is_power_of_two() {
        return Err(GgufError::InvalidAlignment(alignment as i128));
    }
    for tensor in tensors {
        if tensor.offset % alignment != 0 {
            return Err(GgufError::MisalignedTensor {
                name: tensor.name.clone(),
                offset: tensor.offset,
                alignment,
            });
        }
    }
    Ok(())
}
