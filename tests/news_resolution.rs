// tests/news_resolution.rs
//
// NewsResolver with an in-process mock provider:
// - live results are merged across queries, de-duplicated, classified,
//   sorted newest first and capped at the configured limit
// - non-supported countries are filtered out
// - errors, timeouts, empty results and a missing provider all yield the curated set

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use commodity_tracker::news::fallback;
use commodity_tracker::news::types::{Impact, NewsCategory, NewsProvider, RawArticle};
use commodity_tracker::news::{DynNewsProvider, NewsResolver};
use commodity_tracker::tariffs::Jurisdiction;

enum Mode {
    Articles(Vec<RawArticle>),
    Fail,
    Hang,
}

struct MockNews {
    mode: Mode,
    configured: bool,
    calls: AtomicUsize,
}

impl MockNews {
    fn with(mode: Mode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            configured: true,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl NewsProvider for MockNews {
    fn name(&self) -> &'static str {
        "mock_news"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn search(&self, _query: &str) -> Result<Vec<RawArticle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            Mode::Articles(a) => Ok(a.clone()),
            Mode::Fail => Err(anyhow!("upstream 500")),
            Mode::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn probe(&self) -> bool {
        !matches!(self.mode, Mode::Fail)
    }
}

fn raw(id: &str, title: &str, minutes_ago: i64) -> RawArticle {
    RawArticle {
        id: id.to_string(),
        title: title.to_string(),
        summary: String::new(),
        source: "Wire".to_string(),
        published_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
        url: Some(format!("https://example.com/{id}")),
    }
}

fn resolver(provider: Option<DynNewsProvider>, queries: usize, limit: usize) -> NewsResolver {
    let queries = (0..queries).map(|i| format!("query {i}")).collect();
    NewsResolver::new(provider, queries, limit, Duration::from_millis(200))
}

fn assert_is_fallback(items: &[commodity_tracker::news::types::NewsArticle]) {
    assert_eq!(items.len(), 8);
    assert!(items.iter().all(|a| fallback::is_fallback_id(&a.id)));
}

#[tokio::test]
async fn live_results_are_classified_sorted_and_capped() {
    let articles = vec![
        raw("a", "Canada weighs major steel tariffs", 30),
        raw("b", "EU trade talks stall", 10),
        raw("c", "Copper demand rises", 50),
        raw("d", "US imports slow slightly", 5),
    ];
    let p = MockNews::with(Mode::Articles(articles));
    let r = resolver(Some(p.clone() as DynNewsProvider), 3, 3);

    let out = r.resolve_news().await;
    assert_eq!(p.calls.load(Ordering::SeqCst), 3, "every query runs");

    // same ids from three queries collapse; newest first; limit 3
    let ids: Vec<_> = out.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "b", "a"]);

    let a = &out[2];
    assert_eq!(a.country, Jurisdiction::CA);
    assert_eq!(a.category, NewsCategory::Tariff);
    assert_eq!(a.impact, Impact::High);
    assert_eq!(out[1].country, Jurisdiction::EU);
    assert_eq!(out[1].category, NewsCategory::Trade);
}

#[tokio::test]
async fn unsupported_countries_are_dropped() {
    let articles = vec![
        raw("cn", "Beijing announces export controls", 1),
        raw("us", "Washington reviews duty schedule", 2),
    ];
    let r = resolver(Some(MockNews::with(Mode::Articles(articles)) as DynNewsProvider), 1, 8);

    let out = r.resolve_news().await;
    let ids: Vec<_> = out.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["us"]);
}

#[tokio::test]
async fn only_unsupported_results_fall_back() {
    let articles = vec![raw("cn", "Chinese steel output climbs", 1)];
    let r = resolver(Some(MockNews::with(Mode::Articles(articles)) as DynNewsProvider), 1, 8);
    assert_is_fallback(&r.resolve_news().await);
}

#[tokio::test]
async fn provider_error_falls_back() {
    let r = resolver(Some(MockNews::with(Mode::Fail) as DynNewsProvider), 3, 8);
    assert_is_fallback(&r.resolve_news().await);
}

#[tokio::test]
async fn provider_timeout_falls_back() {
    let r = resolver(Some(MockNews::with(Mode::Hang) as DynNewsProvider), 1, 8);
    assert_is_fallback(&r.resolve_news().await);
}

#[tokio::test]
async fn empty_results_fall_back() {
    let r = resolver(Some(MockNews::with(Mode::Articles(Vec::new())) as DynNewsProvider), 2, 8);
    assert_is_fallback(&r.resolve_news().await);
}

#[tokio::test]
async fn unconfigured_or_missing_provider_falls_back_without_calls() {
    let p = Arc::new(MockNews {
        mode: Mode::Articles(vec![raw("x", "US tariffs", 1)]),
        configured: false,
        calls: AtomicUsize::new(0),
    });
    let r = resolver(Some(p.clone() as DynNewsProvider), 3, 8);
    assert_is_fallback(&r.resolve_news().await);
    assert_eq!(p.calls.load(Ordering::SeqCst), 0);
    assert!(!r.probe().await);

    let none = resolver(None, 3, 8);
    assert_is_fallback(&none.resolve_news().await);
}
