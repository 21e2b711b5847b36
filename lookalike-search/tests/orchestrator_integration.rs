//! Integration tests for the platform search pipeline.
//!
//! Every upstream (official APIs, platform pages, mirrors) is stubbed with
//! a wiremock server, so these exercise the real sources, the fallback
//! chain, matching and dedup end to end without touching the network.

use std::time::Duration;

use lookalike_search::{
    search, similarity, Credentials, Endpoints, Platform, SearchConfig, SearchRequest, SourceKind,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig {
        credentials: Credentials {
            youtube_api_key: Some("yt-key".into()),
            facebook_access_token: Some("fb-token".into()),
            twitter_bearer_token: Some("tw-token".into()),
        },
        endpoints: Endpoints::all_at(&server.uri()),
        timeout_seconds: 5,
        user_agent: Some("TestBot/1.0".into()),
        ..Default::default()
    }
}

fn request(keyword: &str) -> SearchRequest {
    SearchRequest::new(keyword).with_throttle(Duration::ZERO)
}

const NITTER_HTML: &str = r#"<html><body><div class="timeline">
  <div class="timeline-item">
    <a class="fullname" href="/acme">Acme</a>
    <a class="username" href="/acme">@acme</a>
    <div class="tweet-content">Not affiliated with anyone</div>
  </div>
  <div class="timeline-item">
    <a class="fullname" href="/bob">Bob</a>
    <a class="username" href="/bob">@bob</a>
  </div>
</div></body></html>"#;

#[tokio::test]
async fn acme_api_match_returns_single_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/twitter/1.1/users/search.json"))
        .and(query_param("q", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Acme Corp", "screen_name": "acme", "description": "Anvils and more"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nitter/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NITTER_HTML))
        .expect(0)
        .mount(&server)
        .await;

    let results = search(Platform::Twitter, &request("acme"), &config_for(&server))
        .await
        .expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].account.name, "Acme Corp");
    assert_eq!(results[0].account.url, "https://x.com/acme");
    assert!(results[0].similarity >= 0.7);
}

#[tokio::test]
async fn api_without_matches_falls_back_to_mirror() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/twitter/1.1/users/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Completely Different", "screen_name": "zzz"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nitter/search"))
        .and(query_param("f", "users"))
        .and(query_param("q", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NITTER_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let results = search(Platform::Twitter, &request("acme"), &config_for(&server))
        .await
        .expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].account.source, SourceKind::Nitter);
    assert_eq!(results[0].account.handle.as_deref(), Some("acme"));
}

#[tokio::test]
async fn youtube_chain_reaches_invidious_when_key_and_page_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube-web/results"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/invidious/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "channel", "author": "Acme", "authorId": "UCacme", "description": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.credentials.youtube_api_key = Some("YOUR_YOUTUBE_API_KEY".into());

    let results = search(Platform::YouTube, &request("acme"), &config)
        .await
        .expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].account.source, SourceKind::Invidious);
    assert_eq!(results[0].account.url, "https://www.youtube.com/channel/UCacme");
}

#[tokio::test]
async fn same_channel_from_two_fallbacks_is_kept_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let page = r#"<script>var ytInitialData = {"contents":[
        {"channelRenderer":{"channelId":"UCacme","title":{"simpleText":"Acme"},
          "descriptionSnippet":{"runs":[{"text":"Short"}]}}}
    ]};</script>"#;
    Mock::given(method("GET"))
        .and(path("/youtube-web/results"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/invidious/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "channel", "author": "Acme", "authorId": "UCacme",
             "description": "A much longer description of the same channel"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.exhaustive_fallbacks = true;

    let results = search(Platform::YouTube, &request("acme"), &config)
        .await
        .expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].account.source, SourceKind::YouTubeResultsPage);
    assert_eq!(results[0].account.description.as_deref(), Some("Short"));
}

#[tokio::test]
async fn facebook_graph_failure_uses_mobile_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/graph/pages/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "(#10) This endpoint requires the 'pages_read_engagement' permission"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let html = r#"<html><body><div id="BrowseResultsContainer">
        <div><a href="/acme.official/">Acme</a><div>Product/service</div></div>
    </div></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/mbasic/search/pages/"))
        .and(query_param("q", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(&server)
        .await;

    let results = search(Platform::Facebook, &request("acme"), &config_for(&server))
        .await
        .expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].account.url, "https://www.facebook.com/acme.official");
}

#[tokio::test]
async fn every_source_failing_yields_empty_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    for platform in Platform::all() {
        let results = search(*platform, &request("acme"), &config_for(&server))
            .await
            .expect("upstream failures are not errors");
        assert!(results.is_empty(), "{platform}");
    }
}

#[tokio::test]
async fn threshold_equal_to_score_is_included() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/twitter/1.1/users/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "acne", "screen_name": "acne"}
        ])))
        .mount(&server)
        .await;

    let threshold = similarity("acne", "acme");
    let request = request("acme").with_threshold(threshold);
    let mut config = config_for(&server);
    config.scraping_enabled = false;

    let results = search(Platform::Twitter, &request, &config).await.expect("search");
    assert_eq!(results.len(), 1);
    assert!((results[0].similarity - threshold).abs() < f64::EPSILON);
}

#[tokio::test]
#[ignore] // Live test: run with `cargo test -- --ignored`
async fn live_invidious_search() {
    let request = SearchRequest::new("rust").with_throttle(Duration::from_millis(500));
    let results = search(Platform::YouTube, &request, &SearchConfig::default())
        .await
        .expect("live search should not error");
    for matched in &results {
        assert!(!matched.account.url.is_empty());
    }
}
