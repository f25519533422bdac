use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::Request,
};

use super::client::ClientKey;

async fn key_for(request: Request<()>) -> ClientKey {
    let (mut parts, ()) = request.into_parts();
    match ClientKey::from_request_parts(&mut parts, &()).await {
        Ok(key) => key,
        Err(never) => match never {},
    }
}

#[tokio::test]
async fn peer_address_wins_over_forwarded_header() {
    let mut request = Request::builder()
        .header("x-forwarded-for", "203.0.113.9")
        .body(())
        .unwrap();
    let peer: SocketAddr = "192.0.2.4:50123".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));

    assert_eq!(key_for(request).await.as_str(), "192.0.2.4");
}

#[tokio::test]
async fn first_forwarded_entry_is_used_without_peer() {
    let request = Request::builder()
        .header("x-forwarded-for", " 203.0.113.9 , 10.0.0.1")
        .body(())
        .unwrap();

    assert_eq!(key_for(request).await.as_str(), "203.0.113.9");
}

#[tokio::test]
async fn unknown_without_any_hint() {
    let request = Request::builder().body(()).unwrap();
    assert_eq!(key_for(request).await, ClientKey("unknown".into()));
}
