use super::*;

#[test]
fn blank_author_becomes_unknown() {
    assert_eq!(QuoteRecord::new("x", "  ").author, "Unknown");
    assert_eq!(QuoteRecord::new("x", "Seneca").author, "Seneca");
}

#[test]
fn missing_author_field_deserializes_as_unknown() {
    let rec: QuoteRecord = serde_json::from_str(r#"{"text":"Be here now."}"#).unwrap();
    assert_eq!(rec, QuoteRecord::new("Be here now.", "Unknown"));
}

#[test]
fn builder_sets_fields() {
    let req = RenderRequest::new(QuoteRecord::new("q", "a"))
        .with_theme(Theme::Stoicism)
        .with_output("out/card.png")
        .with_watermark(false);
    assert_eq!(req.theme, Theme::Stoicism);
    assert_eq!(req.output, Some(PathBuf::from("out/card.png")));
    assert!(!req.add_watermark);
    assert_eq!(RenderRequest::new(QuoteRecord::new("q", "a")).theme, Theme::Motivation);
}
