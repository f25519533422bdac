use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn darken_by_40_percent_keeps_60_percent_of_color() {
    let mut buf = vec![200u8, 100, 50, 255, 0, 0, 0, 255];
    darken_in_place(&mut buf, 0.4).unwrap();
    // 0.4 opacity -> alpha 102, remaining weight 153/255.
    assert_eq!(&buf[..4], &[120, 60, 30, 255]);
    assert_eq!(&buf[4..], &[0, 0, 0, 255]);
}

#[test]
fn darken_zero_opacity_is_noop() {
    let mut buf = vec![9u8, 8, 7, 255];
    darken_in_place(&mut buf, 0.0).unwrap();
    assert_eq!(buf, vec![9, 8, 7, 255]);
}

#[test]
fn fill_over_rejects_partial_pixels() {
    let mut buf = vec![0u8; 5];
    assert!(fill_over_in_place(&mut buf, Rgba8::WHITE, 1.0).is_err());
}

#[test]
fn flatten_drops_alpha() {
    let rgb = flatten_to_rgb(&[1, 2, 3, 255, 4, 5, 6, 255]);
    assert_eq!(rgb, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn layer_over_skips_transparent_and_blends_rest() {
    let mut dst = vec![10u8, 20, 30, 255, 10, 20, 30, 255];
    let layer = vec![0u8, 0, 0, 0, 255, 255, 255, 255];
    layer_over_in_place(&mut dst, &layer).unwrap();
    assert_eq!(&dst[..4], &[10, 20, 30, 255]);
    assert_eq!(&dst[4..], &[255, 255, 255, 255]);
}

#[test]
fn layer_over_rejects_mismatched_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(layer_over_in_place(&mut dst, &[0u8; 4]).is_err());
}
