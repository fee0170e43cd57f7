//! PGS binary layout and header validation.

use enough::Unstoppable;
use pgscodec::*;

/// Assemble a PGS byte stream from raw parts. `palette` is 16 × (a,r,g,b)
/// entries in family-major order.
fn pgs_stream(width: i32, height: i32, palette: &[[u8; 4]; 16], packed: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(4); // pixel size
    out.extend_from_slice(&16u16.to_le_bytes()); // color count
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(packed);
    out
}

/// A palette where entry `i` is the recognizable color (a=255, r=i*10,
/// g=100+i, b=255-i).
fn numbered_palette() -> [[u8; 4]; 16] {
    core::array::from_fn(|i| {
        let i = i as u8;
        [255, i * 10, 100 + i, 255 - i]
    })
}

#[test]
fn renders_nibbles_through_the_family_slot_grid() {
    // 4x1 image: indices 0, 5, 10, 15 exercise all four grid rows.
    let packed = [0x05u8, 0xaf];
    let data = pgs_stream(4, 1, &numbered_palette(), &packed);

    let image = PgsImage::from_bytes(&data, None, Unstoppable).unwrap();
    let rendered = image.render(Unstoppable).unwrap();

    let expected: Vec<RGB8> = [0u8, 5, 10, 15]
        .iter()
        .map(|&i| RGB8::new(i * 10, 100 + i, 255 - i))
        .collect();
    assert_eq!(rendered.pixels(), &expected[..]);

    // Same lookups through the grid directly: index >> 2 is the family row,
    // index & 3 the slot.
    for &i in &[0u8, 5, 10, 15] {
        let entry = image.palette().color(i);
        assert_eq!(entry.a, 255);
        assert_eq!(entry.r, i * 10);
    }
}

#[test]
fn reserializes_byte_exactly() {
    let packed = [0x12u8, 0x34, 0x50]; // 5 pixels, trailing nibble zero
    let data = pgs_stream(5, 1, &numbered_palette(), &packed);

    let image = PgsImage::from_bytes(&data, None, Unstoppable).unwrap();
    assert_eq!(image.to_bytes(), data);
}

#[test]
fn ignores_trailing_bytes_after_packed_data() {
    let packed = [0x00u8, 0x11];
    let mut data = pgs_stream(2, 2, &numbered_palette(), &packed);
    let clean = data.clone();
    data.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

    let image = PgsImage::from_bytes(&data, None, Unstoppable).unwrap();
    assert_eq!(image.packed_data(), &packed[..]);
    assert_eq!(image.to_bytes(), clean);
}

#[test]
fn rejects_wrong_color_count() {
    let mut data = pgs_stream(2, 1, &numbered_palette(), &[0x01]);
    data[9..11].copy_from_slice(&15u16.to_le_bytes());
    match PgsImage::from_bytes(&data, None, Unstoppable) {
        Err(PgsError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn rejects_wrong_pixel_size() {
    let mut data = pgs_stream(2, 1, &numbered_palette(), &[0x01]);
    data[8] = 8;
    match PgsImage::from_bytes(&data, None, Unstoppable) {
        Err(PgsError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn rejects_non_positive_dimensions() {
    let data = pgs_stream(-3, 1, &numbered_palette(), &[0x00, 0x00]);
    match PgsImage::from_bytes(&data, None, Unstoppable) {
        Err(PgsError::InvalidHeader(_)) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn rejects_truncated_packed_data() {
    // 4x2 needs 4 packed bytes; provide 3.
    let data = pgs_stream(4, 2, &numbered_palette(), &[0x00, 0x11, 0x22]);
    match PgsImage::from_bytes(&data, None, Unstoppable) {
        Err(PgsError::UnexpectedEof) => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn rejects_truncated_palette() {
    let full = pgs_stream(1, 1, &numbered_palette(), &[0x00]);
    let data = &full[..40]; // header + part of the palette
    match PgsImage::from_bytes(data, None, Unstoppable) {
        Err(PgsError::UnexpectedEof) => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn limits_apply_to_pgs_loading() {
    let data = pgs_stream(4, 1, &numbered_palette(), &[0x00, 0x11]);
    let limits = Limits {
        max_width: Some(2),
        ..Default::default()
    };
    match PgsImage::from_bytes(&data, Some(&limits), Unstoppable) {
        Err(PgsError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn header_fields_are_little_endian_in_declared_order() {
    let pixels = vec![RGB8::new(128, 64, 32); 6];
    let buffer = PixelBuffer::new(3, 2, pixels).unwrap();
    let mut rng = {
        use rand::SeedableRng;
        rand::rngs::SmallRng::seed_from_u64(5)
    };
    let image = EncodeRequest::new()
        .encode(&buffer, &mut rng, Unstoppable)
        .unwrap();

    let bytes = image.to_bytes();
    assert_eq!(&bytes[0..4], &3i32.to_le_bytes());
    assert_eq!(&bytes[4..8], &2i32.to_le_bytes());
    assert_eq!(bytes[8], 4);
    assert_eq!(&bytes[9..11], &16u16.to_le_bytes());
    // 11-byte header + 64-byte palette + ceil(6/2) packed bytes.
    assert_eq!(bytes.len(), 11 + 64 + 3);
    // Every palette entry is opaque on the encode side.
    for entry in bytes[11..75].chunks_exact(4) {
        assert_eq!(entry[0], 255);
    }
}
