use super::*;

fn q(text: &str) -> QuoteRecord {
    QuoteRecord::new(text, "Someone")
}

#[test]
fn keywords_follow_theme() {
    assert!(theme_keywords(&Theme::Stoicism).contains(&"obstacle"));
    assert!(theme_keywords(&Theme::Happiness).contains(&"joy"));
    assert_eq!(
        theme_keywords(&Theme::parse("cosmic")),
        &["inspire", "motivation"]
    );
}

#[test]
fn matching_is_case_insensitive_substring() {
    let quotes = vec![
        q("Success is not final."),
        q("Eat your vegetables."),
        q("A Leader sees further."),
    ];
    let hits = matching(&quotes, &Theme::Success);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "Success is not final.");

    let hits = matching(&quotes, &Theme::Leadership);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "A Leader sees further.");
}

#[test]
fn matching_with_no_hits_is_empty() {
    let quotes = vec![q("Eat your vegetables.")];
    assert!(matching(&quotes, &Theme::Motivation).is_empty());
}
