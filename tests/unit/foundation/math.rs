use super::*;

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    assert_eq!(fingerprint(b"opensans"), fingerprint(b"opensans"));
    assert_ne!(fingerprint(b"opensans"), fingerprint(b"playfair"));
    assert_eq!(fingerprint(b""), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(200, 153), 120);
}
