//! GGUF container-format reader.
//!
//! Decodes the self-describing GGUF model container: fixed header, typed
//! key-value metadata dictionary, tensor descriptor table, and the aligned
//! start of the tensor-data segment. The decoder works over any in-memory
//! byte slice (a full read, a memory map, the head of a download) and
//! validates as it goes; malformed input fails with a typed [`GgufError`]
//! carrying the offending entry and byte offset, never with a partial
//! document.
//!
//! Tensor payload bytes are out of scope on purpose: the document reports
//! where the data segment starts and where each tensor's bytes begin
//! relative to it, and the caller maps or streams the payloads itself.
//!
//! # Example
//!
//! ```no_run
//! use ggufdump_core::GgufDocument;
//!
//! let doc = GgufDocument::open("model.gguf")?;
//! println!("GGUF v{}, {} tensors", doc.header.version, doc.tensors.len());
//! if let Some(arch) = doc.metadata.get_string("general.architecture") {
//!     println!("architecture: {arch}");
//! }
//! for tensor in &doc.tensors {
//!     println!("{} {:?} @ {}", tensor.name, tensor.shape, doc.data_start + tensor.offset);
//! }
//! # Ok::<(), ggufdump_core::GgufError>(())
//! ```

mod cursor;
mod document;
mod error;
mod layout;
mod metadata;
mod tensor;
mod value;

pub use cursor::{ByteCursor, MAX_STRING_LEN};
pub use document::{
    check_magic, read_version, GgufDocument, GgufHeader, GGUF_MAGIC, GGUF_VERSION_MAX,
    GGUF_VERSION_MIN, MAX_METADATA_COUNT, MAX_TENSOR_COUNT,
};
pub use error::{GgufError, Result};
pub use layout::{
    align_up, resolve_alignment, validate_tensor_offsets, ALIGNMENT_KEY, DEFAULT_ALIGNMENT,
};
pub use metadata::{GgufMetadata, GgufMetadataKv};
pub use tensor::{GgufTensorInfo, GgufTensorType, MAX_TENSOR_DIMS};
pub use value::{GgufValue, GgufValueType};
