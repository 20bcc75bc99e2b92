//! End-to-end wire encoding scenarios exercising the public crate surface.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use num_bigint::BigInt;
use ssh_wire_codec::Buffer;

#[test]
fn test_documented_message_byte_layout() {
    // [u32(1), bool(true), string("abc")] has a fixed, peer-visible layout.
    let mut buf = Buffer::new();
    buf.put_u32(1);
    buf.put_bool(true);
    buf.put_string("abc");

    assert_eq!(
        buf.unread(),
        &[0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0x00, 0x00, 0x03, 0x61, 0x62, 0x63]
    );

    assert_eq!(buf.get_u32().unwrap(), 1);
    assert!(buf.get_bool().unwrap());
    assert_eq!(buf.get_string().unwrap(), "abc");
}

#[test]
fn test_mixed_sequence_reads_back_in_write_order() {
    let mut buf = Buffer::with_capacity(8); // force growth along the way
    buf.put_u64(u64::MAX);
    buf.put_bytes(&[9, 8, 7]);
    buf.put_mpint(&BigInt::from(-1234567890i64));
    buf.put_bool(false);
    buf.put_string("fin");

    assert_eq!(buf.get_u64().unwrap(), u64::MAX);
    assert_eq!(buf.get_bytes().unwrap(), vec![9, 8, 7]);
    assert_eq!(buf.get_mpint().unwrap(), BigInt::from(-1234567890i64));
    assert!(!buf.get_bool().unwrap());
    assert_eq!(buf.get_string().unwrap(), "fin");
    assert_eq!(buf.available(), 0);
}

#[test]
fn test_transport_handoff_via_raw_bytes() {
    // Sender encodes, transport moves raw bytes, receiver wraps and decodes.
    let mut sender = Buffer::new();
    sender.put_u32(42);
    sender.put_string("session");

    let wire = sender.to_unread_vec();
    let mut receiver = Buffer::from_vec(wire);

    assert_eq!(receiver.get_u32().unwrap(), 42);
    assert_eq!(receiver.get_string().unwrap(), "session");
}

#[test]
fn test_compact_then_reuse_between_messages() {
    let mut buf = Buffer::new();
    buf.put_string("first");
    assert_eq!(buf.get_string().unwrap(), "first");

    buf.compact();
    assert_eq!(buf.rpos(), 0);
    assert_eq!(buf.wpos(), 0);

    buf.put_string("second");
    assert_eq!(buf.get_string().unwrap(), "second");
}

#[test]
fn test_length_prefix_slot_patching() {
    // Reserve a u32 slot, write a payload, patch the slot afterwards.
    let mut buf = Buffer::new();
    let slot = buf.wpos();
    buf.put_u32(0);
    let start = buf.wpos();
    buf.put_string("payload under a patched prefix");
    let end = buf.wpos();

    buf.set_wpos(slot);
    buf.put_u32((end - start) as u32);
    buf.set_wpos(end);

    let declared = buf.get_u32().unwrap() as usize;
    assert_eq!(declared, buf.available());
    assert_eq!(buf.get_string().unwrap(), "payload under a patched prefix");
}
