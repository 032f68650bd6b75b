//! Typed metadata values and their wire decoding.

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::{GgufError, Result};

/// Discriminant tag for GGUF metadata values.
///
/// Numeric values match those in the GGUF specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum GgufValueType {
    Uint8 = 0,
    Int8 = 1,
    Uint16 = 2,
    Int16 = 3,
    Uint32 = 4,
    Int32 = 5,
    Float32 = 6,
    Bool = 7,
    String = 8,
    Array = 9,
    Uint64 = 10,
    Int64 = 11,
    Float64 = 12,
}

impl GgufValueType {
    /// Convert from the raw u32 discriminant in the file.
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Uint8),
            1 => Some(Self::Int8),
            2 => Some(Self::Uint16),
            3 => Some(Self::Int16),
            4 => Some(Self::Uint32),
            5 => Some(Self::Int32),
            6 => Some(Self::Float32),
            7 => Some(Self::Bool),
            8 => Some(Self::String),
            9 => Some(Self::Array),
            10 => Some(Self::Uint64),
            11 => Some(Self::Int64),
            12 => Some(Self::Float64),
            _ => None,
        }
    }

    /// Size in bytes of one scalar of this type, `None` for `String` and
    /// `Array` whose payloads are length-dependent.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Uint8 | Self::Int8 | Self::Bool => Some(1),
            Self::Uint16 | Self::Int16 => Some(2),
            Self::Uint32 | Self::Int32 | Self::Float32 => Some(4),
            Self::Uint64 | Self::Int64 | Self::Float64 => Some(8),
            Self::String | Self::Array => None,
        }
    }
}

/// A decoded GGUF metadata value.
///
/// The array variant carries its declared element type. The decoder rejects
/// an element type of `Array`, so a decoded array only ever holds scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GgufValue {
    Uint8(u8),
    Int8(i8),
    Uint16(u16),
    Int16(i16),
    Uint32(u32),
    Int32(i32),
    Float32(f32),
    Bool(bool),
    String(String),
    Array(GgufValueType, Vec<GgufValue>),
    Uint64(u64),
    Int64(i64),
    Float64(f64),
}

impl GgufValue {
    /// Decode one value whose type tag the caller has already read.
    pub fn decode(cursor: &mut ByteCursor<'_>, ty: GgufValueType) -> Result<Self> {
        match ty {
            GgufValueType::Array => Self::decode_array(cursor),
            _ => Self::decode_scalar(cursor, ty),
        }
    }

    /// Decode a scalar of the given type. `Array` is not a scalar and is
    /// rejected here; it only appears when an array declares `Array` as its
    /// element type.
    pub fn decode_scalar(cursor: &mut ByteCursor<'_>, ty: GgufValueType) -> Result<Self> {
        Ok(match ty {
            GgufValueType::Uint8 => Self::Uint8(cursor.read_u8()?),
            GgufValueType::Int8 => Self::Int8(cursor.read_i8()?),
            GgufValueType::Uint16 => Self::Uint16(cursor.read_u16()?),
            GgufValueType::Int16 => Self::Int16(cursor.read_i16()?),
            GgufValueType::Uint32 => Self::Uint32(cursor.read_u32()?),
            GgufValueType::Int32 => Self::Int32(cursor.read_i32()?),
            GgufValueType::Float32 => Self::Float32(cursor.read_f32()?),
            GgufValueType::Bool => Self::Bool(cursor.read_bool()?),
            GgufValueType::String => Self::String(cursor.read_string()?),
            GgufValueType::Uint64 => Self::Uint64(cursor.read_u64()?),
            GgufValueType::Int64 => Self::Int64(cursor.read_i64()?),
            GgufValueType::Float64 => Self::Float64(cursor.read_f64()?),
            GgufValueType::Array => return Err(GgufError::UnsupportedNesting),
        })
    }

    fn decode_array(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let raw = cursor.read_u32()?;
        let elem_ty = GgufValueType::from_u32(raw).ok_or(GgufError::UnknownType(raw))?;
        if elem_ty == GgufValueType::Array {
            return Err(GgufError::UnsupportedNesting);
        }

        let count = cursor.read_i64()?;
        if count < 0 {
            return Err(GgufError::NegativeCount(count));
        }
        let count = count as u64;

        // Every element occupies at least one byte, so a declared count
        // beyond the remaining input can never decode. Rejecting it here
        // keeps a corrupt count from reserving an unbounded Vec.
        if count > cursor.remaining() as u64 {
            return Err(GgufError::Truncated {
                offset: cursor.position(),
                needed: count as usize,
                remaining: cursor.remaining(),
            });
        }

        let mut elements = Vec::with_capacity(count as usize);
        for _ in 0..count {
            elements.push(Self::decode_scalar(cursor, elem_ty)?);
        }
        Ok(Self::Array(elem_ty, elements))
    }

    /// The wire type tag this value carries.
    pub fn value_type(&self) -> GgufValueType {
        match self {
            Self::Uint8(_) => GgufValueType::Uint8,
            Self::Int8(_) => GgufValueType::Int8,
            Self::Uint16(_) => GgufValueType::Uint16,
            Self::Int16(_) => GgufValueType::Int16,
            Self::Uint32(_) => GgufValueType::Uint32,
            Self::Int32(_) => GgufValueType::Int32,
            Self::Float32(_) => GgufValueType::Float32,
            Self::Bool(_) => GgufValueType::Bool,
            Self::String(_) => GgufValueType::String,
            Self::Array(..) => GgufValueType::Array,
            Self::Uint64(_) => GgufValueType::Uint64,
            Self::Int64(_) => GgufValueType::Int64,
            Self::Float64(_) => GgufValueType::Float64,
        }
    }

    /// Widen any unsigned integer variant to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::Uint8(v) => Some(u64::from(v)),
            Self::Uint16(v) => Some(u64::from(v)),
            Self::Uint32(v) => Some(u64::from(v)),
            Self::Uint64(v) => Some(v),
            _ => None,
        }
    }

    /// Widen any signed integer variant to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int8(v) => Some(i64::from(v)),
            Self::Int16(v) => Some(i64::from(v)),
            Self::Int32(v) => Some(i64::from(v)),
            Self::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }
}
