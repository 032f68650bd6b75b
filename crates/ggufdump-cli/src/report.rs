//! Human-readable rendering of a decoded document.

use std::fmt::Write as _;
use std::path::Path;

use ggufdump_core::{GgufDocument, GgufValue};

/// How many characters of a string value the summary shows before eliding.
const STRING_PREVIEW_LEN: usize = 60;

pub fn render(
    path: &Path,
    file_size: u64,
    doc: &GgufDocument,
    with_metadata: bool,
    with_tensors: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: GGUF v{}", path.display(), doc.header.version);
    let _ = writeln!(out, "  file size:        {file_size} B");
    let _ = writeln!(out, "  metadata entries: {}", doc.metadata.len());
    let _ = writeln!(out, "  tensors:          {}", doc.tensors.len());
    let _ = writeln!(out, "  alignment:        {}", doc.alignment);
    let _ = writeln!(out, "  data start:       {:#x}", doc.data_start);
    if let Some(arch) = doc.metadata.get_string("general.architecture") {
        let _ = writeln!(out, "  architecture:     {arch}");
    }
    if let Some(name) = doc.metadata.get_string("general.name") {
        let _ = writeln!(out, "  name:             {name}");
    }

    if with_metadata && !doc.metadata.is_empty() {
        let _ = writeln!(out, "\nmetadata:");
        for kv in doc.metadata.entries() {
            let _ = writeln!(out, "  {} = {}", kv.key, format_value(&kv.value));
        }
    }

    if with_tensors && !doc.tensors.is_empty() {
        let _ = writeln!(out, "\ntensors:");
        for tensor in &doc.tensors {
            let _ = writeln!(
                out,
                "  {}  {:?}  {:?}  {} B @ {:#x}",
                tensor.name,
                tensor.shape,
                tensor.dtype,
                tensor.data_size(),
                tensor.offset,
            );
        }
    }

    out
}

fn format_value(value: &GgufValue) -> String {
    match value {
        GgufValue::Uint8(v) => v.to_string(),
        GgufValue::Int8(v) => v.to_string(),
        GgufValue::Uint16(v) => v.to_string(),
        GgufValue::Int16(v) => v.to_string(),
        GgufValue::Uint32(v) => v.to_string(),
        GgufValue::Int32(v) => v.to_string(),
        GgufValue::Float32(v) => v.to_string(),
        GgufValue::Bool(v) => v.to_string(),
        GgufValue::String(s) => {
            if s.chars().count() > STRING_PREVIEW_LEN {
                let preview: String = s.chars().take(STRING_PREVIEW_LEN).collect();
                format!("{preview:?}…")
            } else {
                format!("{s:?}")
            }
        }
        GgufValue::Array(elem_ty, items) => format!("[{elem_ty:?}; {}]", items.len()),
        GgufValue::Uint64(v) => v.to_string(),
        GgufValue::Int64(v) => v.to_string(),
        GgufValue::Float64(v) => v.to_string(),
    }
}
