//! Shared test fixtures: a minimal GGUF encoder used to exercise the reader.
//!
//! Writing the format is not part of the library, so the tests carry their
//! own byte-level builder. `encode_document` re-encodes a decoded document
//! for the structural round-trip checks.

#![allow(dead_code)]

use ggufdump_core::{GgufDocument, GgufValue, GgufValueType};

pub fn push_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Write a value's payload (without its outer type tag).
pub fn push_value_payload(buf: &mut Vec<u8>, value: &GgufValue) {
    match value {
        GgufValue::Uint8(v) => buf.push(*v),
        GgufValue::Int8(v) => buf.push(*v as u8),
        GgufValue::Uint16(v) => buf.extend_from_slice(&v.to_le_bytes()),
        GgufValue::Int16(v) => buf.extend_from_slice(&v.to_le_bytes()),
        GgufValue::Uint32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        GgufValue::Int32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        GgufValue::Float32(v) => buf.extend_from_slice(&v.to_le_bytes()),
        GgufValue::Bool(v) => buf.push(u8::from(*v)),
        GgufValue::String(s) => push_string(buf, s),
        GgufValue::Array(elem_ty, items) => {
            buf.extend_from_slice(&(*elem_ty as u32).to_le_bytes());
            buf.extend_from_slice(&(items.len() as i64).to_le_bytes());
            for item in items {
                push_value_payload(buf, item);
            }
        }
        GgufValue::Uint64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        GgufValue::Int64(v) => buf.extend_from_slice(&v.to_le_bytes()),
        GgufValue::Float64(v) => buf.extend_from_slice(&v.to_le_bytes()),
    }
}

/// Builder for complete GGUF byte images.
pub struct FileBuilder {
    version: u32,
    metadata: Vec<(String, GgufValue)>,
    tensors: Vec<(String, Vec<i64>, u32, u64)>,
}

impl FileBuilder {
    pub fn new() -> Self {
        Self { version: 3, metadata: Vec::new(), tensors: Vec::new() }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn kv(mut self, key: &str, value: GgufValue) -> Self {
        self.metadata.push((key.to_owned(), value));
        self
    }

    pub fn tensor(mut self, name: &str, dims: &[i64], type_code: u32, offset: u64) -> Self {
        self.tensors.push((name.to_owned(), dims.to_vec(), type_code, offset));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"GGUF");
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&(self.tensors.len() as i64).to_le_bytes());
        buf.extend_from_slice(&(self.metadata.len() as i64).to_le_bytes());

        for (key, value) in &self.metadata {
            push_string(&mut buf, key);
            buf.extend_from_slice(&(value.value_type() as u32).to_le_bytes());
            push_value_payload(&mut buf, value);
        }

        for (name, dims, type_code, offset) in &self.tensors {
            push_string(&mut buf, name);
            buf.extend_from_slice(&(dims.len() as u32).to_le_bytes());
            for dim in dims {
                buf.extend_from_slice(&dim.to_le_bytes());
            }
            buf.extend_from_slice(&type_code.to_le_bytes());
            buf.extend_from_slice(&offset.to_le_bytes());
        }

        buf
    }
}

/// Re-encode the structural portion of a decoded document.
///
/// For any input accepted by the reader, this reproduces the bytes from the
/// magic through the end of the tensor table.
pub fn encode_document(doc: &GgufDocument) -> Vec<u8> {
    let mut builder = FileBuilder::new().version(doc.header.version);
    for entry in doc.metadata.entries() {
        builder = builder.kv(&entry.key, entry.value.clone());
    }
    for tensor in &doc.tensors {
        let dims: Vec<i64> = tensor.shape.iter().map(|&d| d as i64).collect();
        builder = builder.tensor(&tensor.name, &dims, tensor.dtype.raw(), tensor.offset);
    }
    builder.build()
}

/// A small, fully valid v3 file: one alignment override, two tensors.
pub fn sample_file() -> Vec<u8> {
    FileBuilder::new()
        .kv("general.architecture", GgufValue::String("llama".into()))
        .kv("general.alignment", GgufValue::Uint32(64))
        .kv(
            "tokenizer.ggml.tokens",
            GgufValue::Array(
                GgufValueType::String,
                vec![GgufValue::String("<s>".into()), GgufValue::String("</s>".into())],
            ),
        )
        .tensor("token_embd.weight", &[4096, 32000], 12, 0)
        .tensor("output_norm.weight", &[4096], 0, 1 << 16)
        .build()
}
