#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for boundary conditions and error scenarios:
//! underflow, malformed prefixes, growth boundaries, and cursor arithmetic.

use num_bigint::BigInt;
use ssh_wire_codec::{Buffer, CompressionLevel, WireError, Zlib};

// ============================================================================
// BUFFER UNDERFLOW AND MALFORMED INPUT
// ============================================================================

#[test]
fn test_underflow_on_every_fixed_width_read() {
    let mut buf = Buffer::from_vec(vec![0x01]);
    assert!(matches!(buf.get_u32(), Err(WireError::Underflow { .. })));
    assert!(matches!(buf.get_u64(), Err(WireError::Underflow { .. })));
    // The failed reads consumed nothing.
    assert_eq!(buf.get_u8().unwrap(), 0x01);
    assert!(matches!(buf.get_u8(), Err(WireError::Underflow { .. })));
    assert!(matches!(buf.get_bool(), Err(WireError::Underflow { .. })));
}

#[test]
fn test_length_prefix_larger_than_available_underflows() {
    let mut buf = Buffer::new();
    buf.put_u32(1000);
    buf.put_raw(&[0xAA; 10]);
    match buf.get_bytes() {
        Err(WireError::Underflow { needed, available }) => {
            assert_eq!(needed, 1000);
            assert_eq!(available, 10);
        }
        other => panic!("expected underflow, got {other:?}"),
    }
}

#[test]
fn test_sign_bit_length_prefix_is_malformed_not_underflow() {
    let mut buf = Buffer::new();
    buf.put_u32(0xFFFF_FFFF);
    assert!(matches!(
        buf.get_bytes(),
        Err(WireError::MalformedLength(0xFFFF_FFFF))
    ));
}

#[test]
fn test_empty_buffer_reads_fail_cleanly() {
    let mut buf = Buffer::new();
    assert!(buf.is_empty());
    assert!(matches!(buf.get_bytes(), Err(WireError::Underflow { .. })));
    assert!(matches!(buf.get_mpint(), Err(WireError::Underflow { .. })));
    assert!(matches!(buf.get_string(), Err(WireError::Underflow { .. })));
}

// ============================================================================
// GROWTH AND CURSOR BOUNDARIES
// ============================================================================

#[test]
fn test_growth_at_exact_power_of_two_boundary() {
    let mut buf = Buffer::with_capacity(16);
    buf.put_raw(&[0x5A; 16]);
    assert_eq!(buf.capacity_remaining(), 0);
    buf.put_u8(0xFF); // triggers reallocation
    assert_eq!(buf.available(), 17);
    assert_eq!(&buf.unread()[..16], &[0x5A; 16]);
    assert_eq!(buf.unread()[16], 0xFF);
}

#[test]
fn test_available_sums_write_sizes_across_growth() {
    let sizes = [1usize, 7, 64, 300, 3, 1024, 15];
    let mut buf = Buffer::with_capacity(4);
    for (i, size) in sizes.iter().enumerate() {
        buf.put_raw(&vec![i as u8; *size]);
    }
    assert_eq!(buf.available(), sizes.iter().sum::<usize>());
    for (i, size) in sizes.iter().enumerate() {
        assert_eq!(buf.get_raw(*size).unwrap(), vec![i as u8; *size]);
    }
}

#[test]
fn test_zero_length_operations() {
    let mut buf = Buffer::new();
    buf.put_raw(&[]);
    buf.put_bytes(&[]);
    buf.put_string("");
    assert_eq!(buf.get_raw(0).unwrap(), Vec::<u8>::new());
    assert_eq!(buf.get_bytes().unwrap(), Vec::<u8>::new());
    assert_eq!(buf.get_string().unwrap(), "");
    assert_eq!(buf.available(), 0);
}

#[test]
fn test_compact_on_fully_consumed_buffer() {
    let mut buf = Buffer::from_vec(b"consumed".to_vec());
    buf.get_raw(8).unwrap();
    buf.compact();
    assert_eq!(buf.rpos(), 0);
    assert_eq!(buf.wpos(), 0);
}

#[test]
fn test_set_rpos_clamps_to_wpos() {
    let mut buf = Buffer::from_vec(vec![1, 2, 3]);
    buf.set_rpos(100);
    assert_eq!(buf.rpos(), 3);
    assert_eq!(buf.available(), 0);
}

#[test]
fn test_mpint_zero_and_boundary_magnitudes() {
    for v in [
        BigInt::from(0),
        BigInt::from(127),  // fits without pad
        BigInt::from(128),  // needs pad byte
        BigInt::from(-128), // exactly one byte in two's complement
        BigInt::parse_bytes(b"ffffffffffffffffffffffffffffffff", 16).unwrap(),
    ] {
        let mut buf = Buffer::new();
        buf.put_mpint(&v);
        assert_eq!(buf.get_mpint().unwrap(), v, "value {v}");
    }
}

// ============================================================================
// COMPRESSION EDGE CASES
// ============================================================================

#[test]
fn test_compress_buffer_with_consumed_prefix() {
    // Only the unread region is compressed; already-read bytes are dead.
    let mut codec = Zlib::new(CompressionLevel::default());
    let mut buf = Buffer::new();
    buf.put_string("header");
    buf.put_raw(b"payload payload payload");
    assert_eq!(buf.get_string().unwrap(), "header");

    let rpos = buf.rpos();
    codec.compress(&mut buf).unwrap();
    assert_eq!(buf.rpos(), rpos);

    let mut out = Buffer::new();
    codec.decompress(&mut buf, &mut out).unwrap();
    assert_eq!(out.unread(), b"payload payload payload");
}

#[test]
fn test_decompress_appends_to_existing_destination() {
    let mut codec = Zlib::new(CompressionLevel::default());
    let mut src = Buffer::from_vec(b"tail".to_vec());
    codec.compress(&mut src).unwrap();

    let mut dst = Buffer::new();
    dst.put_raw(b"head-");
    codec.decompress(&mut src, &mut dst).unwrap();
    assert_eq!(dst.unread(), b"head-tail");
}

#[test]
fn test_truncated_stream_decompresses_available_prefix_only() {
    let mut codec = Zlib::new(CompressionLevel::new(9).unwrap());
    let payload = vec![0x42; 10_000];
    let mut buf = Buffer::from_vec(payload);
    codec.compress(&mut buf).unwrap();

    // Drop the last bytes of the chunk; inflate must not invent data.
    let compressed = buf.to_unread_vec();
    let mut truncated = Buffer::from_vec(compressed[..compressed.len() - 4].to_vec());
    let mut out = Buffer::new();
    let result = codec.decompress(&mut truncated, &mut out);
    if result.is_ok() {
        assert!(out.available() <= 10_000);
    }
}
