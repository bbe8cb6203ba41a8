use std::collections::HashSet;
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use pixel_palette_wasm::{PaletteError, PaletteOptions, extract_palette, extract_palette_bytes};

fn encode_png(w: u32, h: u32, raw: Vec<u8>) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_raw(w, h, raw).unwrap());
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
    buf
}

/// 16×16 image where every pixel is a different color.
fn gradient() -> Vec<u8> {
    let mut raw = Vec::with_capacity(16 * 16 * 4);
    for y in 0..16u8 {
        for x in 0..16u8 {
            raw.extend_from_slice(&[x * 16, y * 16, 0, 255]);
        }
    }
    raw
}

#[test]
fn sprite_png_palette() {
    let red = [255, 0, 0, 255];
    let green = [0, 255, 0, 255];
    let blue = [0, 0, 255, 255];
    let clear = [0, 0, 0, 0];
    let rows = [
        [clear, blue, blue, clear],
        [blue, red, red, blue],
        [green, red, red, green],
        [clear, green, green, clear],
    ];
    let raw: Vec<u8> = rows.iter().flatten().flatten().copied().collect();
    let png = encode_png(4, 4, raw);

    let result = extract_palette_bytes(&png, &PaletteOptions::default()).unwrap();
    assert_eq!(result.hex_codes(), vec!["#ff0000ff", "#00ff00ff", "#0000ffff"]);
    assert!(!result.overflowed);
    assert_eq!(result.count, 3);
}

#[test]
fn gradient_overflows_at_the_cap() {
    let options = PaletteOptions::new(0.0, 10, 30).unwrap();
    let result = extract_palette(&gradient(), &options).unwrap();
    assert!(result.overflowed);
    assert_eq!(result.count, 30);

    let distinct: HashSet<String> = result.hex_codes().into_iter().collect();
    assert_eq!(distinct.len(), 30);
}

#[test]
fn exact_mode_returns_every_distinct_color() {
    let options = PaletteOptions::new(0.0, 10, 1000).unwrap();
    let raw = gradient();
    let result = extract_palette(&raw, &options).unwrap();
    assert!(!result.overflowed);

    let expected: HashSet<String> = raw
        .chunks_exact(4)
        .map(|p| format!("#{:02x}{:02x}{:02x}ff", p[0], p[1], p[2]))
        .collect();
    let got: HashSet<String> = result.hex_codes().into_iter().collect();
    assert_eq!(got, expected);
    assert_eq!(result.count, 256);
}

#[test]
fn exact_cap_does_not_overflow() {
    let options = PaletteOptions::new(0.0, 10, 256).unwrap();
    let result = extract_palette(&gradient(), &options).unwrap();
    assert!(!result.overflowed);
    assert_eq!(result.count, 256);
}

#[test]
fn perceptual_threshold_shrinks_the_palette() {
    let exact = extract_palette(&gradient(), &PaletteOptions::new(0.0, 10, 1000).unwrap()).unwrap();
    let loose = extract_palette(&gradient(), &PaletteOptions::new(10.0, 10, 1000).unwrap()).unwrap();
    assert!(loose.count < exact.count);
    assert!(loose.count >= 1);
}

#[test]
fn undecodable_bytes_are_an_error() {
    let err = extract_palette_bytes(b"definitely not an image", &PaletteOptions::default()).unwrap_err();
    assert!(matches!(err, PaletteError::Decode(_)));
}

#[test]
fn trailing_partial_pixel_is_an_error() {
    let mut raw = gradient();
    raw.push(7);
    let err = extract_palette(&raw, &PaletteOptions::default()).unwrap_err();
    assert!(matches!(err, PaletteError::MisalignedBuffer { len: 1025 }));
}
