use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use quotecard::{Chooser, QuoteRecord, Theme, ThreadRngChooser, choose};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use super::{QuoteCache, QuoteSource, StaticQuoteSource, matching};
use crate::{config::QuoteSettings, error::ServerError};

const STOIC_FALLBACK_TEXT: &str = "The obstacle is the way.";
const STOIC_FALLBACK_AUTHOR: &str = "Marcus Aurelius";

/// Upstream quote APIs.
#[derive(Debug, Clone)]
pub struct QuoteEndpoints {
    /// Returns `[{"q": .., "a": ..}]`.
    pub zenquotes: String,
    /// Returns `[{"text": .., "author": ..}]`, the full collection.
    pub type_fit: String,
    /// Returns `{"quote": .., "author": ..}`.
    pub stoic: String,
}

impl From<&QuoteSettings> for QuoteEndpoints {
    fn from(settings: &QuoteSettings) -> Self {
        Self {
            zenquotes: settings.zenquotes_url.clone(),
            type_fit: settings.type_fit_url.clone(),
            stoic: settings.stoic_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StoicQuote {
    quote: String,
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    a: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeFitQuote {
    text: String,
    author: Option<String>,
}

fn record(text: String, author: Option<String>) -> Option<QuoteRecord> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(QuoteRecord::new(text, author.unwrap_or_default()))
}

/// Fetches quotes from public APIs, falling back through a cached collection to built-in quotes.
///
/// Stoicism asks the stoic API first and answers with a fixed stoic quote when it fails. Every
/// other theme tries ZenQuotes, then a keyword match over the cached type.fit collection, then a
/// random built-in quote.
pub struct HttpQuoteSource {
    client: Client,
    endpoints: QuoteEndpoints,
    cache: Arc<QuoteCache>,
    chooser: Arc<dyn Chooser>,
    fallback: StaticQuoteSource,
}

impl std::fmt::Debug for HttpQuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpQuoteSource")
            .field("endpoints", &self.endpoints)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl HttpQuoteSource {
    pub fn new(
        endpoints: QuoteEndpoints,
        timeout: Duration,
        cache: Arc<QuoteCache>,
    ) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quotecard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ServerError::http_client(err.to_string()))?;
        Ok(Self {
            client,
            endpoints,
            cache,
            chooser: Arc::new(ThreadRngChooser),
            fallback: StaticQuoteSource::default(),
        })
    }

    /// Use `chooser` for every random pick, including the built-in fallback.
    pub fn with_chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.fallback = self.fallback.with_chooser(chooser.clone());
        self.chooser = chooser;
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }

    async fn stoic(&self) -> Option<QuoteRecord> {
        match self.get_json::<StoicQuote>(&self.endpoints.stoic).await {
            Ok(body) => record(body.quote, body.author),
            Err(err) => {
                tracing::warn!(error = %err, "stoic quote api failed");
                None
            }
        }
    }

    async fn zenquotes(&self) -> Option<QuoteRecord> {
        match self.get_json::<Vec<ZenQuote>>(&self.endpoints.zenquotes).await {
            Ok(body) => body.into_iter().next().and_then(|q| record(q.q, q.a)),
            Err(err) => {
                tracing::warn!(error = %err, "zenquotes api failed");
                None
            }
        }
    }

    async fn collection(&self) -> Option<Arc<Vec<QuoteRecord>>> {
        if let Some(cached) = self.cache.get() {
            return Some(cached);
        }
        match self
            .get_json::<Vec<TypeFitQuote>>(&self.endpoints.type_fit)
            .await
        {
            Ok(body) => {
                let quotes: Vec<QuoteRecord> = body
                    .into_iter()
                    .filter_map(|q| record(q.text, q.author))
                    .collect();
                tracing::debug!(count = quotes.len(), "refreshed quote collection");
                Some(self.cache.put(quotes))
            }
            Err(err) => {
                tracing::warn!(error = %err, "quote collection fetch failed");
                None
            }
        }
    }

    async fn themed(&self, theme: &Theme) -> Option<QuoteRecord> {
        let quotes = self.collection().await?;
        let candidates = matching(&quotes, theme);
        choose(self.chooser.as_ref(), &candidates).map(|quote| (*quote).clone())
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    #[tracing::instrument(skip_all, fields(theme = %theme))]
    async fn quote(&self, theme: &Theme) -> QuoteRecord {
        if *theme == Theme::Stoicism {
            return match self.stoic().await {
                Some(quote) => quote,
                None => QuoteRecord::new(STOIC_FALLBACK_TEXT, STOIC_FALLBACK_AUTHOR),
            };
        }
        if let Some(quote) = self.zenquotes().await {
            return quote;
        }
        if let Some(quote) = self.themed(theme).await {
            return quote;
        }
        tracing::info!("serving built-in quote");
        self.fallback.pick()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quotes/http.rs"]
mod tests;
