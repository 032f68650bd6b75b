//! The key-value metadata table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::{GgufError, Result};
use crate::value::{GgufValue, GgufValueType};

/// A single key-value metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GgufMetadataKv {
    pub key: String,
    pub value: GgufValue,
}

/// The decoded metadata dictionary.
///
/// Entries keep file order so a re-serialization or diagnostic dump
/// reproduces what was read. Keys are unique; a repeated key aborts the
/// decode. Lookup goes through a side index, leaving iteration order
/// untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GgufMetadata {
    entries: Vec<GgufMetadataKv>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl GgufMetadata {
    /// Decode exactly `count` entries. The count comes from the header and
    /// is never inferred from stream content.
    pub fn decode(cursor: &mut ByteCursor<'_>, count: u64) -> Result<Self> {
        // Each entry needs at least 12 bytes on the wire (key length prefix
        // plus type tag), which bounds the up-front reservation.
        let cap = count.min(cursor.remaining() as u64 / 12) as usize;
        let mut metadata =
            Self { entries: Vec::with_capacity(cap), index: HashMap::with_capacity(cap) };

        for i in 0..count {
            let entry_start = cursor.position();
            let key = cursor.read_string()?;
            if metadata.index.contains_key(&key) {
                return Err(GgufError::DuplicateKey(key));
            }

            let value = Self::decode_value(cursor).map_err(|source| GgufError::MetadataEntry {
                index: i,
                key: key.clone(),
                offset: entry_start,
                source: Box::new(source),
            })?;

            metadata.index.insert(key.clone(), metadata.entries.len());
            metadata.entries.push(GgufMetadataKv { key, value });
        }

        Ok(metadata)
    }

    fn decode_value(cursor: &mut ByteCursor<'_>) -> Result<GgufValue> {
        let raw = cursor.read_u32()?;
        let ty = GgufValueType::from_u32(raw).ok_or(GgufError::UnknownType(raw))?;
        GgufValue::decode(cursor, ty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[GgufMetadataKv] {
        &self.entries
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&GgufValue> {
        self.index.get(key).map(|&i| &self.entries[i].value)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key)?.as_u64()
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        u32::try_from(self.get_u64(key)?).ok()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }
}
