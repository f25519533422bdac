//! Quote sourcing for the gateway.
//!
//! Every source always produces a record: upstream failures fall through to cached collections
//! and finally to a built-in list.

use async_trait::async_trait;
use quotecard::{QuoteRecord, Theme};

pub mod cache;
pub mod fallback;
pub mod http;

pub use cache::QuoteCache;
pub use fallback::StaticQuoteSource;
pub use http::{HttpQuoteSource, QuoteEndpoints};

/// Supplies a quote for a theme.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Pick a quote for `theme`. Never fails; sources degrade to built-in quotes.
    async fn quote(&self, theme: &Theme) -> QuoteRecord;
}

/// Lowercase substrings that mark a quote as fitting `theme`.
pub fn theme_keywords(theme: &Theme) -> &'static [&'static str] {
    match theme {
        Theme::Motivation => &["motivation", "inspire", "dream", "success", "goal", "action"],
        Theme::Stoicism => &["stoic", "virtue", "calm", "acceptance", "adversity", "obstacle"],
        Theme::Success => &["success", "achievement", "victory", "winning", "accomplish", "excel"],
        Theme::Leadership => &["leader", "guide", "vision", "influence", "inspire", "direction"],
        Theme::Happiness => &["happy", "joy", "content", "smile", "peace", "pleasure", "delight"],
        Theme::Unknown(_) => &["inspire", "motivation"],
    }
}

/// Quotes from `quotes` whose text contains any keyword for `theme`.
pub fn matching<'a>(quotes: &'a [QuoteRecord], theme: &Theme) -> Vec<&'a QuoteRecord> {
    let keywords = theme_keywords(theme);
    quotes
        .iter()
        .filter(|q| {
            let text = q.text.to_lowercase();
            keywords.iter().any(|k| text.contains(k))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/quotes/keywords.rs"]
mod tests;
