//! Edge case and boundary tests for the fixed header and its helpers.

mod common;

use common::FileBuilder;
use ggufdump_core::{
    check_magic, read_version, GgufDocument, GgufError, GGUF_MAGIC, GGUF_VERSION_MAX,
    GGUF_VERSION_MIN, MAX_METADATA_COUNT, MAX_TENSOR_COUNT,
};

// --- Magic ---

#[test]
fn magic_constant_is_gguf_bytes() {
    assert_eq!(&GGUF_MAGIC, b"GGUF");
}

#[test]
fn check_magic_valid() {
    assert!(check_magic(b"GGUF"));
    assert!(check_magic(b"GGUF\x03\x00\x00\x00"));
    assert!(check_magic(b"GGUFextra bytes after"));
}

#[test]
fn check_magic_too_short() {
    assert!(!check_magic(b""));
    assert!(!check_magic(b"G"));
    assert!(!check_magic(b"GGU"));
}

#[test]
fn check_magic_wrong_bytes() {
    assert!(!check_magic(b"GGML"));
    assert!(!check_magic(b"GGUX"));
    assert!(!check_magic(b"gguf"));
    assert!(!check_magic(b"FUGG"));
}

// --- read_version ---

#[test]
fn read_version_v2_and_v3() {
    assert_eq!(read_version(&FileBuilder::new().version(2).build()), Some(2));
    assert_eq!(read_version(&FileBuilder::new().version(3).build()), Some(3));
}

#[test]
fn read_version_too_short() {
    assert_eq!(read_version(b""), None);
    assert_eq!(read_version(b"GGUF"), None);
    assert_eq!(read_version(b"GGUF\x03\x00\x00"), None);
}

#[test]
fn read_version_bad_magic() {
    let mut data = FileBuilder::new().build();
    data[..4].copy_from_slice(b"GGML");
    assert_eq!(read_version(&data), None);
}

#[test]
fn read_version_does_not_range_check() {
    let mut data = FileBuilder::new().build();
    data[4..8].copy_from_slice(&99u32.to_le_bytes());
    // The helper reports what is on disk; decode() is what validates.
    assert_eq!(read_version(&data), Some(99));
}

// --- Header validation through decode ---

#[test]
fn empty_document_decodes() {
    let doc = GgufDocument::decode(&FileBuilder::new().build()).unwrap();
    assert_eq!(doc.header.version, 3);
    assert_eq!(doc.header.tensor_count, 0);
    assert_eq!(doc.header.metadata_count, 0);
    assert!(doc.metadata.is_empty());
    assert!(doc.tensors.is_empty());
}

#[test]
fn v2_document_decodes() {
    let doc = GgufDocument::decode(&FileBuilder::new().version(2).build()).unwrap();
    assert_eq!(doc.header.version, 2);
}

#[test]
fn bad_magic_is_rejected() {
    let mut data = FileBuilder::new().build();
    data[..4].copy_from_slice(b"GGUX");
    let err = GgufDocument::decode(&data).unwrap_err();
    assert!(matches!(err, GgufError::BadMagic(m) if &m == b"GGUX"));
}

#[test]
fn versions_outside_supported_range_are_rejected() {
    assert_eq!(GGUF_VERSION_MIN, 2);
    assert_eq!(GGUF_VERSION_MAX, 3);
    for version in [0u32, 1, 4, 99] {
        let data = FileBuilder::new().version(version).build();
        let err = GgufDocument::decode(&data).unwrap_err();
        assert!(
            matches!(err, GgufError::UnsupportedVersion(v) if v == version),
            "version {version} must be rejected"
        );
    }
}

#[test]
fn negative_tensor_count_is_rejected_before_any_allocation() {
    let mut data = FileBuilder::new().build();
    data[8..16].copy_from_slice(&(-1i64).to_le_bytes());
    let err = GgufDocument::decode(&data).unwrap_err();
    assert!(matches!(err, GgufError::CountOverflow { field: "tensor", count: -1, .. }));
}

#[test]
fn negative_metadata_count_is_rejected() {
    let mut data = FileBuilder::new().build();
    data[16..24].copy_from_slice(&i64::MIN.to_le_bytes());
    let err = GgufDocument::decode(&data).unwrap_err();
    assert!(matches!(err, GgufError::CountOverflow { field: "metadata", count: i64::MIN, .. }));
}

#[test]
fn implausibly_large_counts_are_rejected() {
    let mut data = FileBuilder::new().build();
    data[8..16].copy_from_slice(&((MAX_TENSOR_COUNT as i64) + 1).to_le_bytes());
    assert!(matches!(
        GgufDocument::decode(&data).unwrap_err(),
        GgufError::CountOverflow { field: "tensor", .. }
    ));

    let mut data = FileBuilder::new().build();
    data[16..24].copy_from_slice(&((MAX_METADATA_COUNT as i64) + 1).to_le_bytes());
    assert!(matches!(
        GgufDocument::decode(&data).unwrap_err(),
        GgufError::CountOverflow { field: "metadata", .. }
    ));
}

#[test]
fn counts_at_the_ceiling_pass_header_validation() {
    // The header accepts the bound itself; the decode then fails on the
    // missing entries, not on the count.
    let mut data = FileBuilder::new().build();
    data[16..24].copy_from_slice(&(MAX_METADATA_COUNT as i64).to_le_bytes());
    assert!(matches!(GgufDocument::decode(&data).unwrap_err(), GgufError::Truncated { .. }));
}

#[test]
fn truncated_header_is_rejected() {
    let data = FileBuilder::new().build();
    for len in 0..data.len() {
        let err = GgufDocument::decode(&data[..len]).unwrap_err();
        assert!(
            matches!(err, GgufError::Truncated { .. } | GgufError::BadMagic(_)),
            "prefix of {len} bytes must fail cleanly, got {err:?}"
        );
    }
}
