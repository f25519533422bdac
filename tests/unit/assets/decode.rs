use std::io::Cursor;

use super::*;

fn encode_png(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_resizes_to_canvas_regardless_of_aspect() {
    let src = image::RgbaImage::from_pixel(40, 10, image::Rgba([10, 20, 30, 255]));
    let canvas = Canvas::new(16, 16).unwrap();

    let out = decode_resized(&encode_png(src), canvas).unwrap();
    assert_eq!((out.width, out.height), (16, 16));
    assert_eq!(out.rgba8_premul.len(), 16 * 16 * 4);
    assert!(
        out.rgba8_premul
            .chunks_exact(4)
            .all(|px| px == [10, 20, 30, 255])
    );
}

#[test]
fn decode_premultiplies_translucent_pixels() {
    let src = image::RgbaImage::from_pixel(1, 1, image::Rgba([100, 50, 200, 128]));
    let canvas = Canvas::new(1, 1).unwrap();

    let out = decode_resized(&encode_png(src), canvas).unwrap();
    assert_eq!(
        out.rgba8_premul,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn corrupt_or_missing_files_are_asset_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let bogus = tmp.path().join("stone.jpg");
    std::fs::write(&bogus, b"definitely not a jpeg").unwrap();

    let err = load_background(&bogus, Canvas::CARD).unwrap_err();
    assert!(matches!(err, QuoteCardError::Asset(_)));

    let err = load_background(&tmp.path().join("missing.jpg"), Canvas::CARD).unwrap_err();
    assert!(err.to_string().contains("missing.jpg"));
}

#[test]
fn from_raw_checks_length() {
    assert!(PremulImage::from_raw(2, 2, vec![0; 16]).is_ok());
    assert!(PremulImage::from_raw(2, 2, vec![0; 15]).is_err());
}
