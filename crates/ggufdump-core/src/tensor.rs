//! The tensor descriptor table.

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::{GgufError, Result};

/// Highest dimensionality a descriptor may declare.
pub const MAX_TENSOR_DIMS: u32 = 8;

/// Element types a tensor may carry.
///
/// The discriminants follow the GGML type-code table; quantized kinds store
/// whole blocks of elements per fixed-size byte group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum GgufTensorType {
    F32,
    F16,
    Q4_0,
    Q4_1,
    Q5_0,
    Q5_1,
    Q8_0,
    Q8_1,
    Q2_K,
    Q3_K,
    Q4_K,
    Q5_K,
    Q6_K,
    Q8_K,
    I8,
    I16,
    I32,
    I64,
    F64,
    BF16,
}

impl GgufTensorType {
    /// Map a raw on-disk type code to its element type.
    pub const fn from_raw(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::F32),
            1 => Some(Self::F16),
            2 => Some(Self::Q4_0),
            3 => Some(Self::Q4_1),
            6 => Some(Self::Q5_0),
            7 => Some(Self::Q5_1),
            8 => Some(Self::Q8_0),
            9 => Some(Self::Q8_1),
            10 => Some(Self::Q2_K),
            11 => Some(Self::Q3_K),
            12 => Some(Self::Q4_K),
            13 => Some(Self::Q5_K),
            14 => Some(Self::Q6_K),
            15 => Some(Self::Q8_K),
            24 => Some(Self::I8),
            25 => Some(Self::I16),
            26 => Some(Self::I32),
            27 => Some(Self::I64),
            28 => Some(Self::F64),
            30 => Some(Self::BF16),
            _ => None,
        }
    }

    /// The raw on-disk code for this type.
    pub const fn raw(self) -> u32 {
        match self {
            Self::F32 => 0,
            Self::F16 => 1,
            Self::Q4_0 => 2,
            Self::Q4_1 => 3,
            Self::Q5_0 => 6,
            Self::Q5_1 => 7,
            Self::Q8_0 => 8,
            Self::Q8_1 => 9,
            Self::Q2_K => 10,
            Self::Q3_K => 11,
            Self::Q4_K => 12,
            Self::Q5_K => 13,
            Self::Q6_K => 14,
            Self::Q8_K => 15,
            Self::I8 => 24,
            Self::I16 => 25,
            Self::I32 => 26,
            Self::I64 => 27,
            Self::F64 => 28,
            Self::BF16 => 30,
        }
    }

    /// Bytes per element for plain types, bytes per block for quantized ones.
    pub const fn element_size(self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::F16 | Self::BF16 | Self::I16 => 2,
            Self::I8 => 1,
            Self::F64 | Self::I64 => 8,
            Self::Q4_0 => 18,
            Self::Q4_1 => 20,
            Self::Q5_0 => 22,
            Self::Q5_1 => 24,
            Self::Q8_0 => 34,
            Self::Q8_1 => 36,
            Self::Q2_K => 82,
            Self::Q3_K => 110,
            Self::Q4_K => 144,
            Self::Q5_K => 176,
            Self::Q6_K => 210,
            Self::Q8_K => 256,
        }
    }

    /// Elements per quantization block (1 for plain types).
    pub const fn block_size(self) -> usize {
        match self {
            Self::Q4_0 | Self::Q4_1 | Self::Q5_0 | Self::Q5_1 | Self::Q8_0 | Self::Q8_1 => 32,
            Self::Q2_K | Self::Q3_K | Self::Q4_K | Self::Q5_K | Self::Q6_K | Self::Q8_K => 256,
            _ => 1,
        }
    }

    pub const fn is_quantized(self) -> bool {
        !matches!(
            self,
            Self::F32 | Self::F16 | Self::BF16 | Self::F64 | Self::I8 | Self::I16 | Self::I32 | Self::I64
        )
    }

    /// Bytes a tensor of this type with `n_elements` elements occupies in
    /// the data segment, rounded up to whole quantization blocks.
    pub fn data_size(self, n_elements: u64) -> u64 {
        n_elements.div_ceil(self.block_size() as u64).saturating_mul(self.element_size() as u64)
    }
}

/// One tensor descriptor from the tensor index, without its payload bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GgufTensorInfo {
    pub name: String,
    /// Extents in file order; length equals the declared dimensionality.
    pub shape: Vec<u64>,
    pub dtype: GgufTensorType,
    /// Byte offset relative to the start of the data segment.
    pub offset: u64,
}

impl GgufTensorInfo {
    /// Decode exactly `count` descriptors, preserving file order. Duplicate
    /// names are permitted here; uniqueness is a consumer policy.
    pub fn decode_table(cursor: &mut ByteCursor<'_>, count: u64) -> Result<Vec<Self>> {
        // A descriptor occupies at least 24 bytes (name length prefix,
        // dimensionality, type code, offset), bounding the reservation.
        let cap = count.min(cursor.remaining() as u64 / 24) as usize;
        let mut tensors = Vec::with_capacity(cap);

        for i in 0..count {
            let entry_start = cursor.position();
            let name = cursor.read_string()?;
            let tensor = Self::decode_fields(cursor, name.clone()).map_err(|source| {
                GgufError::TensorEntry {
                    index: i,
                    name,
                    offset: entry_start,
                    source: Box::new(source),
                }
            })?;
            tensors.push(tensor);
        }

        Ok(tensors)
    }

    fn decode_fields(cursor: &mut ByteCursor<'_>, name: String) -> Result<Self> {
        let n_dims = cursor.read_u32()?;
        if n_dims > MAX_TENSOR_DIMS {
            return Err(GgufError::DimensionalityOverflow { n_dims, max: MAX_TENSOR_DIMS });
        }

        let mut shape = Vec::with_capacity(n_dims as usize);
        for _ in 0..n_dims {
            let dim = cursor.read_i64()?;
            if dim < 0 {
                return Err(GgufError::InvalidShape(dim));
            }
            shape.push(dim as u64);
        }

        let code = cursor.read_u32()?;
        let dtype = GgufTensorType::from_raw(code).ok_or(GgufError::UnknownTensorType(code))?;
        let offset = cursor.read_u64()?;

        Ok(Self { name, shape, dtype, offset })
    }

    /// Number of elements the shape describes (1 for a scalar).
    pub fn n_elements(&self) -> u64 {
        self.shape.iter().fold(1u64, |acc, &d| acc.saturating_mul(d))
    }

    /// Bytes this tensor occupies in the data segment.
    pub fn data_size(&self) -> u64 {
        self.dtype.data_size(self.n_elements())
    }
}
