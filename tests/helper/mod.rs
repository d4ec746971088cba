//! Feed server test utilities

use std::sync::Arc;

use goreleaser_resolve::release::feeds::HttpFeedClient;
use goreleaser_resolve::release::resolver::ReleaseResolver;
use mockito::{Mock, ServerGuard};

/// Serve `body` as the release feed with the given file suffix, expecting `hits` requests
pub async fn mock_feed(
    server: &mut ServerGuard,
    suffix: &str,
    status: usize,
    body: &str,
    hits: usize,
) -> Mock {
    server
        .mock("GET", format!("/static/releases{}.json", suffix).as_str())
        .match_header("user-agent", "goreleaser-action")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

pub fn resolver_for(server: &ServerGuard) -> ReleaseResolver {
    resolver_with_base_url(&server.url())
}

pub fn resolver_with_base_url(base_url: &str) -> ReleaseResolver {
    let client = HttpFeedClient::with_default_user_agent().unwrap();
    ReleaseResolver::new(Arc::new(client), base_url)
}
