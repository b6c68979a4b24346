//! Tests for CatalogRecord and metadata assembly
//!
//! These tests verify:
//! - Derived color count for every resolution / table combination
//! - Assembly copies descriptor, scan and timestamp fields
//! - Persisted JSON shape (field names, version string, extra fields)
//! - Extra field merging

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use gifcatalog::catalog::{CatalogRecord, COMPRESSION_TYPE, NUMERIC_FORMAT};
use gifcatalog::format::{BlockScanResult, ScanEnd, ScreenDescriptor, Version};
use gifcatalog::metadata::{assemble, format_timestamp, FileTimestamps};

// =============================================================================
// Helper Functions
// =============================================================================

fn descriptor(has_gct: bool, color_resolution: u8) -> ScreenDescriptor {
    ScreenDescriptor {
        version: Version::Gif89a,
        width: 640,
        height: 480,
        has_global_color_table: has_gct,
        color_resolution,
        sort_flag: false,
        global_color_table_size_exponent: 3,
        background_color_index: 2,
        pixel_aspect_ratio: 0,
    }
}

fn scan(image_count: u32, comments: &[&str]) -> BlockScanResult {
    BlockScanResult {
        image_count,
        comments: comments.iter().map(|c| c.to_string()).collect(),
        end: ScanEnd::Trailer,
    }
}

fn timestamps() -> FileTimestamps {
    FileTimestamps::new("2024-01-02 03:04:05", "2024-02-03 04:05:06")
}

fn sample_record() -> CatalogRecord {
    assemble(&descriptor(true, 8), scan(3, &["hi"]), timestamps(), "/pics/a.gif")
}

// =============================================================================
// Color Count Tests
// =============================================================================

#[test]
fn test_color_count_for_every_resolution() {
    for resolution in 1u8..=8 {
        assert_eq!(
            descriptor(true, resolution).color_count(),
            1u32 << (resolution + 1),
            "resolution {}",
            resolution
        );
        assert_eq!(descriptor(false, resolution).color_count(), 0);
    }
}

#[test]
fn test_color_count_zero_exactly_without_table() {
    for resolution in 1u8..=8 {
        let with_table = descriptor(true, resolution).color_count();
        assert_ne!(with_table, 0);
        assert!(with_table.is_power_of_two());
    }
}

#[test]
fn test_assembled_color_count() {
    let with = assemble(&descriptor(true, 3), scan(0, &[]), timestamps(), "a.gif");
    let without = assemble(&descriptor(false, 3), scan(0, &[]), timestamps(), "a.gif");

    assert_eq!(with.color_count, 16);
    assert_eq!(without.color_count, 0);
}

// =============================================================================
// Assembly Tests
// =============================================================================

#[test]
fn test_assemble_copies_all_fields() {
    let record = sample_record();

    assert_eq!(record.path, "/pics/a.gif");
    assert_eq!(record.version, Version::Gif89a);
    assert_eq!(record.width, 640);
    assert_eq!(record.height, 480);
    assert!(record.has_global_color_table);
    assert_eq!(record.color_resolution, 8);
    assert_eq!(record.global_color_table_size_exponent, 3);
    assert_eq!(record.background_color_index, 2);
    assert_eq!(record.pixel_aspect_ratio, 0);
    assert_eq!(record.color_count, 512);
    assert_eq!(record.created_at, "2024-01-02 03:04:05");
    assert_eq!(record.modified_at, "2024-02-03 04:05:06");
    assert_eq!(record.compression_type, COMPRESSION_TYPE);
    assert_eq!(record.numeric_format, NUMERIC_FORMAT);
    assert_eq!(record.image_count, 3);
    assert_eq!(record.comments, vec!["hi".to_string()]);
    assert!(record.extra_fields.is_empty());
}

#[test]
fn test_format_constants() {
    assert_eq!(COMPRESSION_TYPE, "LZW");
    assert_eq!(NUMERIC_FORMAT, "Little Endian");
}

#[test]
fn test_format_timestamp_shape() {
    let formatted = format_timestamp(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000));

    // YYYY-MM-DD HH:MM:SS in local time; the exact value depends on the zone
    assert_eq!(formatted.len(), 19);
    assert_eq!(&formatted[4..5], "-");
    assert_eq!(&formatted[7..8], "-");
    assert_eq!(&formatted[10..11], " ");
    assert_eq!(&formatted[13..14], ":");
    assert_eq!(&formatted[16..17], ":");
    assert!(formatted.starts_with("2023-11-1"));
}

#[test]
fn test_file_timestamps_from_path() {
    let temp = tempfile::NamedTempFile::new().unwrap();

    let stamps = FileTimestamps::from_path(temp.path()).unwrap();

    assert_eq!(stamps.created_at.len(), 19);
    assert_eq!(stamps.modified_at.len(), 19);
}

#[test]
fn test_file_timestamps_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();

    assert!(FileTimestamps::from_path(&dir.path().join("missing.gif")).is_err());
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_json_field_names() {
    let value = serde_json::to_value(sample_record()).unwrap();

    assert_eq!(value["path"], "/pics/a.gif");
    assert_eq!(value["version"], "GIF89a");
    assert_eq!(value["width"], 640);
    assert_eq!(value["has_global_color_table"], true);
    assert_eq!(value["color_resolution"], 8);
    assert_eq!(value["color_count"], 512);
    assert_eq!(value["created_at"], "2024-01-02 03:04:05");
    assert_eq!(value["compression_type"], "LZW");
    assert_eq!(value["numeric_format"], "Little Endian");
    assert_eq!(value["image_count"], 3);
    assert_eq!(value["comments"][0], "hi");
}

#[test]
fn test_empty_extra_fields_omitted() {
    let value = serde_json::to_value(sample_record()).unwrap();

    assert!(value.get("extra_fields").is_none());
}

#[test]
fn test_extra_fields_serialized_when_present() {
    let mut record = sample_record();
    record.merge_extra_fields(BTreeMap::from([("title".to_string(), "Cat".to_string())]));

    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["extra_fields"]["title"], "Cat");
}

#[test]
fn test_record_without_extra_fields_deserializes() {
    let json = serde_json::to_string(&sample_record()).unwrap();
    assert!(!json.contains("extra_fields"));

    let record: CatalogRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(record, sample_record());
}

#[test]
fn test_unknown_version_rejected_on_load() {
    let mut value = serde_json::to_value(sample_record()).unwrap();
    value["version"] = "GIF99z".into();

    assert!(serde_json::from_value::<CatalogRecord>(value).is_err());
}

// =============================================================================
// Extra Field Tests
// =============================================================================

#[test]
fn test_merge_extra_fields_overwrites_and_keeps() {
    let mut record = sample_record();
    record.merge_extra_fields(BTreeMap::from([
        ("title".to_string(), "Cat".to_string()),
        ("tag".to_string(), "pets".to_string()),
    ]));
    record.merge_extra_fields(BTreeMap::from([("title".to_string(), "Dog".to_string())]));

    assert_eq!(record.extra_field("title"), Some("Dog"));
    assert_eq!(record.extra_field("tag"), Some("pets"));
    assert_eq!(record.extra_field("missing"), None);
    // Typed fields untouched
    assert_eq!(record.width, 640);
}
