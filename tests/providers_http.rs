// tests/providers_http.rs
//
// HTTP adapters against a local wiremock server:
// - Metals-API: LME conversion, API-level error, HTTP 500, missing rate
// - Alpha Vantage: global quote parsing, rate-limit note, empty quote
// - NewsAPI: article mapping, removed/incomplete articles, error status, probe

use commodity_tracker::news::providers::NewsApiProvider;
use commodity_tracker::news::types::NewsProvider;
use commodity_tracker::pricing::providers::{AlphaVantageProvider, MetalsApiProvider};
use commodity_tracker::pricing::types::QuoteProvider;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn metals(server: &MockServer) -> MetalsApiProvider {
    MetalsApiProvider::with_base_url(Some("test-key".into()), server.uri())
}

fn alpha(server: &MockServer) -> AlphaVantageProvider {
    AlphaVantageProvider::with_base_url(Some("test-key".into()), server.uri())
}

fn newsapi(server: &MockServer) -> NewsApiProvider {
    NewsApiProvider::with_base_url(Some("test-key".into()), server.uri())
}

#[tokio::test]
async fn metals_api_converts_copper_to_usd_per_lb() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("symbols", "LME-XCU"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "timestamp": 1_717_000_000,
            "rates": { "USDLME-XCU": 0.33 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let p = metals(&server);
    let sym = p.symbol_for("copper").expect("copper covered");
    let q = p.fetch_quote(sym).await.expect("quote");
    assert!((q.price - 0.33 * 14.583).abs() < 1e-9);
    assert!(q.as_of.is_some());
}

#[tokio::test]
async fn metals_api_failures_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("symbols", "XAU"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "code": 104, "info": "monthly usage limit reached" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("symbols", "XAG"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("symbols", "XPT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "rates": { "USDXAU": 2000.0 }
        })))
        .mount(&server)
        .await;

    let p = metals(&server);
    assert!(p.fetch_quote("XAU").await.is_none(), "api-level error");
    assert!(p.fetch_quote("XAG").await.is_none(), "http 500");
    assert!(p.fetch_quote("XPT").await.is_none(), "missing rate");
    assert!(!p.probe().await);
}

#[tokio::test]
async fn unconfigured_metals_api_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let p = MetalsApiProvider::with_base_url(None, server.uri());
    assert!(!p.is_configured());
    assert!(!p.probe().await);
}

#[tokio::test]
async fn alpha_vantage_reads_global_quote() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "GLOBAL_QUOTE"))
        .and(query_param("symbol", "WTI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Global Quote": {
                "01. symbol": "WTI",
                "05. price": "78.9100",
                "07. latest trading day": "2024-05-31",
                "10. change percent": "-0.4500%"
            }
        })))
        .mount(&server)
        .await;

    let p = alpha(&server);
    let sym = p.symbol_for("crude_oil").expect("crude covered");
    let q = p.fetch_quote(sym).await.expect("quote");
    assert!((q.price - 78.91).abs() < 1e-9);
    assert_eq!(q.change_percent, Some(-0.45));
    assert!(q.as_of.is_some());
}

#[tokio::test]
async fn alpha_vantage_rate_limit_and_empty_quote_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("symbol", "WHEAT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("symbol", "CORN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Global Quote": {} })))
        .mount(&server)
        .await;

    let p = alpha(&server);
    assert!(p.fetch_quote("WHEAT").await.is_none());
    assert!(p.fetch_quote("CORN").await.is_none());
}

#[tokio::test]
async fn newsapi_maps_articles_and_skips_removed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "trade war tariff"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "totalResults": 3,
            "articles": [
                {
                    "source": { "id": null, "name": "Reuters" },
                    "title": "Canada &amp; US resume tariff talks",
                    "description": "<p>Negotiators meet again.</p>",
                    "url": "https://example.com/talks",
                    "publishedAt": "2025-06-16T12:00:00Z",
                    "content": null
                },
                {
                    "source": { "name": null },
                    "title": "[Removed]",
                    "description": null,
                    "url": "https://removed.com",
                    "publishedAt": "2025-06-16T11:00:00Z"
                },
                {
                    "source": { "name": "Wire" },
                    "title": "No link here",
                    "description": "x",
                    "url": null,
                    "publishedAt": "2025-06-16T10:00:00Z"
                }
            ]
        })))
        .mount(&server)
        .await;

    let p = newsapi(&server);
    let out = p.search("trade war tariff").await.expect("search ok");
    assert_eq!(out.len(), 1);
    let a = &out[0];
    assert_eq!(a.id, "https://example.com/talks");
    assert_eq!(a.title, "Canada & US resume tariff talks");
    assert_eq!(a.summary, "Negotiators meet again.");
    assert_eq!(a.source, "Reuters");
}

#[tokio::test]
async fn newsapi_error_status_is_err_and_probe_reports_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid."
        })))
        .mount(&server)
        .await;

    let p = newsapi(&server);
    assert!(p.search("tariff").await.is_err());
    assert!(!p.probe().await);
}

#[tokio::test]
async fn newsapi_probe_uses_single_result_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "test"))
        .and(query_param("pageSize", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok", "totalResults": 0, "articles": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(newsapi(&server).probe().await);
}
