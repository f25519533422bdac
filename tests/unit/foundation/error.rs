use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QuoteCardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(QuoteCardError::asset("x").to_string().contains("asset error:"));
    assert!(
        QuoteCardError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        QuoteCardError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = QuoteCardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
