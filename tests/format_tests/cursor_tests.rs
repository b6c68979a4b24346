//! Tests for ByteCursor
//!
//! These tests verify:
//! - Sequential primitive reads
//! - Little-endian decoding
//! - Truncated reads fail without moving the cursor
//! - Absolute seeks and skips

use gifcatalog::format::ByteCursor;
use gifcatalog::CatalogError;

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_u8_sequence() {
    let mut cursor = ByteCursor::new(vec![0x01u8, 0x02, 0x03]);

    assert_eq!(cursor.read_u8().unwrap(), 0x01);
    assert_eq!(cursor.read_u8().unwrap(), 0x02);
    assert_eq!(cursor.read_u8().unwrap(), 0x03);
    assert_eq!(cursor.remaining(), 0);
    assert!(cursor.is_empty());
}

#[test]
fn test_read_u16_le() {
    let mut cursor = ByteCursor::new(vec![0x40u8, 0x01, 0xFF, 0xFF]);

    assert_eq!(cursor.read_u16_le().unwrap(), 320);
    assert_eq!(cursor.read_u16_le().unwrap(), u16::MAX);
    assert_eq!(cursor.position(), 4);
}

#[test]
fn test_read_bytes_returns_slice() {
    let mut cursor = ByteCursor::new(b"GIF89a rest".to_vec());

    let sig = cursor.read_bytes(6).unwrap();
    assert_eq!(&sig[..], b"GIF89a");
    assert_eq!(cursor.position(), 6);
    assert_eq!(cursor.remaining(), 5);
}

#[test]
fn test_read_array() {
    let mut cursor = ByteCursor::new(vec![1u8, 2, 3, 4]);

    let arr: [u8; 3] = cursor.read_array().unwrap();
    assert_eq!(arr, [1, 2, 3]);
    assert_eq!(cursor.remaining(), 1);
}

#[test]
fn test_read_zero_bytes_at_end() {
    let mut cursor = ByteCursor::new(vec![7u8]);
    cursor.skip(1).unwrap();

    let empty = cursor.read_bytes(0).unwrap();
    assert!(empty.is_empty());
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_read_u8_past_end_is_truncated() {
    let mut cursor = ByteCursor::new(Vec::<u8>::new());

    match cursor.read_u8() {
        Err(CatalogError::Truncated {
            offset,
            needed,
            available,
        }) => {
            assert_eq!(offset, 0);
            assert_eq!(needed, 1);
            assert_eq!(available, 0);
        }
        other => panic!("Expected Truncated, got {:?}", other),
    }
}

#[test]
fn test_read_u16_with_one_byte_left_does_not_move() {
    let mut cursor = ByteCursor::new(vec![0xAAu8, 0xBB, 0xCC]);
    cursor.skip(2).unwrap();

    assert!(matches!(
        cursor.read_u16_le(),
        Err(CatalogError::Truncated { offset: 2, needed: 2, available: 1 })
    ));
    assert_eq!(cursor.position(), 2);
    assert_eq!(cursor.read_u8().unwrap(), 0xCC);
}

#[test]
fn test_skip_past_end_is_truncated() {
    let mut cursor = ByteCursor::new(vec![0u8; 4]);

    assert!(matches!(cursor.skip(5), Err(CatalogError::Truncated { .. })));
    assert_eq!(cursor.position(), 0);
    cursor.skip(4).unwrap();
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn test_read_bytes_past_end_is_truncated() {
    let mut cursor = ByteCursor::new(vec![0u8; 3]);

    assert!(matches!(cursor.read_bytes(4), Err(CatalogError::Truncated { .. })));
    assert_eq!(cursor.position(), 0);
}

// =============================================================================
// Seek Tests
// =============================================================================

#[test]
fn test_seek_absolute() {
    let mut cursor = ByteCursor::new(vec![10u8, 11, 12, 13]);
    cursor.skip(3).unwrap();

    cursor.seek_absolute(1).unwrap();
    assert_eq!(cursor.read_u8().unwrap(), 11);
}

#[test]
fn test_seek_to_end_allowed() {
    let mut cursor = ByteCursor::new(vec![0u8; 4]);

    cursor.seek_absolute(4).unwrap();
    assert_eq!(cursor.remaining(), 0);
    assert!(cursor.read_u8().is_err());
}

#[test]
fn test_seek_past_end_fails() {
    let mut cursor = ByteCursor::new(vec![0u8; 4]);
    cursor.skip(2).unwrap();

    assert!(matches!(cursor.seek_absolute(5), Err(CatalogError::Truncated { .. })));
    assert_eq!(cursor.position(), 2);
}
