use std::sync::Arc;

use async_trait::async_trait;
use quotecard::{Chooser, QuoteRecord, Theme, ThreadRngChooser, choose};

use super::QuoteSource;

const DEFAULT_QUOTES: [(&str, &str); 5] = [
    (
        "The best way to predict the future is to create it.",
        "Abraham Lincoln",
    ),
    (
        "Believe you can and you're halfway there.",
        "Theodore Roosevelt",
    ),
    (
        "It does not matter how slowly you go as long as you do not stop.",
        "Confucius",
    ),
    ("Quality is not an act, it is a habit.", "Aristotle"),
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
];

/// Quotes served when upstream APIs are unreachable or disabled.
pub fn default_quotes() -> Vec<QuoteRecord> {
    DEFAULT_QUOTES
        .into_iter()
        .map(|(text, author)| QuoteRecord::new(text, author))
        .collect()
}

/// Picks from a fixed list. Used offline and as the last link of [`super::HttpQuoteSource`].
#[derive(Clone)]
pub struct StaticQuoteSource {
    quotes: Arc<Vec<QuoteRecord>>,
    chooser: Arc<dyn Chooser>,
}

impl std::fmt::Debug for StaticQuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticQuoteSource")
            .field("quotes", &self.quotes.len())
            .finish_non_exhaustive()
    }
}

impl Default for StaticQuoteSource {
    fn default() -> Self {
        Self::new(default_quotes())
    }
}

impl StaticQuoteSource {
    /// Source over `quotes`; an empty list is replaced by the defaults.
    pub fn new(quotes: Vec<QuoteRecord>) -> Self {
        let quotes = if quotes.is_empty() {
            default_quotes()
        } else {
            quotes
        };
        Self {
            quotes: Arc::new(quotes),
            chooser: Arc::new(ThreadRngChooser),
        }
    }

    pub fn with_chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.chooser = chooser;
        self
    }

    /// Pick one quote.
    pub fn pick(&self) -> QuoteRecord {
        match choose(self.chooser.as_ref(), &self.quotes) {
            Some(quote) => quote.clone(),
            None => {
                let (text, author) = DEFAULT_QUOTES[0];
                QuoteRecord::new(text, author)
            }
        }
    }
}

#[async_trait]
impl QuoteSource for StaticQuoteSource {
    async fn quote(&self, _theme: &Theme) -> QuoteRecord {
        self.pick()
    }
}
