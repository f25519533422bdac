//! HTTP gateway around the `quotecard` renderer.
//!
//! Adds upstream quote sourcing, a per-client daily quota and housekeeping of generated images.

use std::sync::Arc;

use quotecard::{AssetDirs, BackgroundResolver, CardStyle, Compositor, FontResolver};

pub mod config;
pub mod error;
pub mod housekeeping;
pub mod http;
pub mod quota;
pub mod quotes;
pub mod telemetry;

use config::Settings;
use error::ServerError;
use http::AppState;
use quota::InMemoryQuotaStore;
use quotes::{HttpQuoteSource, QuoteCache, QuoteEndpoints, QuoteSource, StaticQuoteSource};

/// Build the renderer described by the asset settings.
pub fn build_compositor(settings: &Settings) -> Result<Compositor, ServerError> {
    let dirs = AssetDirs::under(&settings.assets.root);
    let fonts = if settings.assets.system_fonts {
        FontResolver::standard(&dirs.fonts)
    } else {
        FontResolver::without_system(&dirs.fonts)
    }
    .resolve_book();

    let mut style = CardStyle::default();
    if let Some(text) = settings.assets.watermark_text.as_ref() {
        style.watermark_text = text.clone();
    }
    Ok(Compositor::with_parts(
        style,
        BackgroundResolver::new(&dirs.backgrounds),
        fonts,
    )?)
}

/// Build the quote source: upstream APIs unless fetching is disabled.
pub fn build_quote_source(settings: &Settings) -> Result<Arc<dyn QuoteSource>, ServerError> {
    if !settings.quotes.fetch {
        tracing::info!("upstream quote fetching disabled; serving built-in quotes");
        return Ok(Arc::new(StaticQuoteSource::default()));
    }
    let cache = Arc::new(QuoteCache::new(settings.quotes.cache_ttl));
    let source = HttpQuoteSource::new(
        QuoteEndpoints::from(&settings.quotes),
        settings.quotes.timeout,
        cache,
    )?;
    Ok(Arc::new(source))
}

/// Wire every shared service the router needs.
pub fn build_state(settings: &Settings) -> Result<AppState, ServerError> {
    let compositor = build_compositor(settings)?;
    let quotes = build_quote_source(settings)?;
    let quota = InMemoryQuotaStore::new(settings.quota.limit.get(), settings.quota.reset_after);
    std::fs::create_dir_all(&settings.output.directory)?;

    Ok(AppState {
        compositor: Arc::new(compositor),
        quotes,
        quota: Arc::new(quota),
        output: settings.output.clone(),
    })
}
