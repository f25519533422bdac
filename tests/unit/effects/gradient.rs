use super::*;

fn pixel(buf: &[u8], canvas: Canvas, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * canvas.width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn fallback_matches_reference_ramp() {
    let canvas = Canvas::CARD;
    let buf = fallback_background(canvas);
    assert_eq!(buf.len(), canvas.pixel_count() * 4);

    assert_eq!(pixel(&buf, canvas, 0, 0), [30, 30, 70, 255]);
    // r = 30 + 40*540/1080, g = 30 + 20*540/1080, b = 70 + 30*540/1080
    assert_eq!(pixel(&buf, canvas, 17, 540), [50, 40, 85, 255]);
    assert_eq!(pixel(&buf, canvas, 1079, 1079), [69, 49, 99, 255]);
}

#[test]
fn linear_rows_are_uniform_and_deterministic() {
    let canvas = Canvas::new(32, 16).unwrap();
    let a = fallback_background(canvas);
    let b = fallback_background(canvas);
    assert_eq!(a, b);
    for y in 0..canvas.height {
        let first = pixel(&a, canvas, 0, y);
        for x in 1..canvas.width {
            assert_eq!(pixel(&a, canvas, x, y), first);
        }
    }
}

#[test]
fn linear_handles_descending_channels() {
    let canvas = Canvas::new(1, 4).unwrap();
    let buf = gradient_rgba8(
        canvas,
        Rgba8::new(66, 103, 178, 255),
        Rgba8::new(24, 59, 107, 255),
        GradientKind::Linear,
    );
    assert_eq!(pixel(&buf, canvas, 0, 0), [66, 103, 178, 255]);
    // 66 + (-42*2)/4 = 45, 103 + (-44*2)/4 = 81, 178 + (-71*2)/4 = 143 (truncated toward zero)
    assert_eq!(pixel(&buf, canvas, 0, 2), [45, 81, 143, 255]);
}

#[test]
fn radial_center_is_start_color_and_corners_approach_end() {
    let canvas = Canvas::new(64, 64).unwrap();
    let from = Rgba8::new(255, 153, 102, 255);
    let to = Rgba8::new(204, 51, 51, 255);
    let buf = gradient_rgba8(canvas, from, to, GradientKind::Radial);

    assert_eq!(pixel(&buf, canvas, 32, 32), [255, 153, 102, 255]);
    let corner = pixel(&buf, canvas, 0, 0);
    assert_eq!(corner, [204, 51, 51, 255]);
    assert!(buf.chunks_exact(4).all(|px| px[3] == 255));
}
