use std::{sync::Arc, time::Duration};

use httpmock::prelude::*;
use quotecard::{FixedChooser, Theme};
use serde_json::json;

use super::*;
use crate::quotes::fallback::default_quotes;

fn source(server: &MockServer) -> HttpQuoteSource {
    let endpoints = QuoteEndpoints {
        zenquotes: server.url("/zen"),
        type_fit: server.url("/typefit"),
        stoic: server.url("/stoic"),
    };
    HttpQuoteSource::new(
        endpoints,
        Duration::from_secs(2),
        Arc::new(QuoteCache::new(Duration::from_secs(3600))),
    )
    .expect("client")
    .with_chooser(Arc::new(FixedChooser(0)))
}

#[tokio::test]
async fn zenquotes_answer_is_used_first() {
    let server = MockServer::start_async().await;
    let zen = server
        .mock_async(|when, then| {
            when.method(GET).path("/zen");
            then.status(200)
                .json_body(json!([{"q": "Act now.", "a": "Zen Author", "h": "<b>"}]));
        })
        .await;

    let quote = source(&server).quote(&Theme::Motivation).await;

    zen.assert_async().await;
    assert_eq!(quote.text, "Act now.");
    assert_eq!(quote.author, "Zen Author");
}

#[tokio::test]
async fn collection_is_filtered_by_theme_and_cached() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/zen");
            then.status(503);
        })
        .await;
    let collection = server
        .mock_async(|when, then| {
            when.method(GET).path("/typefit");
            then.status(200).json_body(json!([
                {"text": "Eat your vegetables.", "author": "Mom"},
                {"text": "Happiness depends upon ourselves.", "author": null},
                {"text": "Joy is contagious.", "author": "Someone"}
            ]));
        })
        .await;

    let source = source(&server);
    let first = source.quote(&Theme::Happiness).await;
    let second = source.quote(&Theme::Happiness).await;

    collection.assert_hits_async(1).await;
    assert_eq!(first.text, "Happiness depends upon ourselves.");
    assert_eq!(first.author, "Unknown");
    assert_eq!(first, second);
}

#[tokio::test]
async fn falls_back_to_builtin_quotes_when_nothing_matches() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/zen");
            then.status(200).body("not json");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/typefit");
            then.status(200)
                .json_body(json!([{"text": "Eat your vegetables.", "author": "Mom"}]));
        })
        .await;

    let quote = source(&server).quote(&Theme::Leadership).await;
    assert_eq!(quote, default_quotes()[0]);
}

#[tokio::test]
async fn stoicism_uses_stoic_api() {
    let server = MockServer::start_async().await;
    let stoic = server
        .mock_async(|when, then| {
            when.method(GET).path("/stoic");
            then.status(200)
                .json_body(json!({"quote": "Waste no more time.", "author": "Marcus Aurelius"}));
        })
        .await;
    let zen = server
        .mock_async(|when, then| {
            when.method(GET).path("/zen");
            then.status(200).json_body(json!([{"q": "Other.", "a": "Other"}]));
        })
        .await;

    let quote = source(&server).quote(&Theme::Stoicism).await;

    stoic.assert_async().await;
    zen.assert_hits_async(0).await;
    assert_eq!(quote.text, "Waste no more time.");
}

#[tokio::test]
async fn stoic_failure_serves_fixed_quote() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stoic");
            then.status(500);
        })
        .await;

    let quote = source(&server).quote(&Theme::Stoicism).await;
    assert_eq!(quote.text, "The obstacle is the way.");
    assert_eq!(quote.author, "Marcus Aurelius");
}
