// src/news/mod.rs
pub mod classify;
pub mod fallback;
pub mod providers;
pub mod types;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::news::types::{NewsArticle, NewsCategory, NewsProvider, RawArticle};
use crate::tariffs::Jurisdiction;

pub type DynNewsProvider = Arc<dyn NewsProvider>;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_articles_total",
            "Articles returned, labelled by origin (live|fallback)."
        );
        describe_counter!(
            "news_provider_errors_total",
            "News provider search failures that triggered the fallback set."
        );
    });
}

/// Normalize text: decode entities, strip tags, fold curly quotes, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace (covers decoded &nbsp;)
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    // 5) Length cap: 1500 chars
    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}

/// Live search with classification, falling back to the curated set.
pub struct NewsResolver {
    provider: Option<DynNewsProvider>,
    queries: Vec<String>,
    limit: usize,
    timeout: Duration,
}

impl NewsResolver {
    pub fn new(
        provider: Option<DynNewsProvider>,
        queries: Vec<String>,
        limit: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            queries,
            limit,
            timeout,
        }
    }

    pub fn provider(&self) -> Option<&DynNewsProvider> {
        self.provider.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_configured())
    }

    /// Never fails: any provider problem or an empty live result yields the
    /// curated set instead.
    pub async fn resolve_news(&self) -> Vec<NewsArticle> {
        ensure_metrics_described();

        if let Some(provider) = self.provider.as_ref().filter(|p| p.is_configured()) {
            match self.fetch_live(provider.as_ref()).await {
                Ok(articles) if !articles.is_empty() => {
                    tracing::info!(count = articles.len(), provider = provider.name(), "live news");
                    counter!("news_articles_total", "origin" => "live")
                        .increment(articles.len() as u64);
                    return articles;
                }
                Ok(_) => {
                    tracing::info!(provider = provider.name(), "no supported live news; using curated set");
                }
                Err(e) => {
                    tracing::warn!(error = ?e, provider = provider.name(), "news provider error");
                    counter!("news_provider_errors_total").increment(1);
                }
            }
        }

        let out: Vec<NewsArticle> = fallback::articles(Utc::now())
            .into_iter()
            .filter(|a| classify::is_supported(a.country))
            .collect();
        counter!("news_articles_total", "origin" => "fallback").increment(out.len() as u64);
        out
    }

    /// Run every query in sequence, merge, drop repeated ids, classify, keep
    /// supported countries, newest first, capped at `limit`. The first failing
    /// query fails the whole run.
    pub async fn fetch_live(&self, provider: &dyn NewsProvider) -> Result<Vec<NewsArticle>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut merged: Vec<RawArticle> = Vec::new();

        for q in &self.queries {
            let batch = tokio::time::timeout(self.timeout, provider.search(q))
                .await
                .map_err(|_| anyhow!("news search timed out for query '{q}'"))??;
            tracing::debug!(query = %q, count = batch.len(), "news query");
            merged.extend(batch.into_iter().filter(|a| seen.insert(a.id.clone())));
        }

        let mut out: Vec<NewsArticle> = merged
            .into_iter()
            .map(classify_article)
            .filter(|a| classify::is_supported(a.country))
            .collect();
        out.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        out.truncate(self.limit);
        Ok(out)
    }

    /// `true` when the provider answered a one-result search.
    pub async fn probe(&self) -> bool {
        match self.provider.as_ref() {
            Some(p) if p.is_configured() => tokio::time::timeout(self.timeout, p.probe())
                .await
                .unwrap_or(false),
            _ => false,
        }
    }
}

pub fn classify_article(raw: RawArticle) -> NewsArticle {
    let (country, category, impact) = classify::classify(&raw.title, &raw.summary);
    NewsArticle {
        id: raw.id,
        title: raw.title,
        summary: raw.summary,
        source: raw.source,
        published_at: raw.published_at,
        url: raw.url,
        country,
        category,
        impact,
    }
}

pub fn by_country(articles: &[NewsArticle], country: Jurisdiction) -> Vec<&NewsArticle> {
    articles.iter().filter(|a| a.country == country).collect()
}

pub fn by_category(articles: &[NewsArticle], category: NewsCategory) -> Vec<&NewsArticle> {
    articles.iter().filter(|a| a.category == category).collect()
}

/// `"42m ago"`, `"5h ago"`, `"3d ago"`. Future timestamps read as `"0m ago"`.
pub fn format_time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - published).num_minutes().max(0);
    if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn normalize_text_decodes_and_collapses() {
        let s = "  <b>Tariffs</b>&nbsp;&nbsp; rise \u{201C}sharply\u{201D}...  ";
        assert_eq!(normalize_text(s), "Tariffs rise \"sharply\"...");
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now - ChronoDuration::minutes(48), now), "48m ago");
        assert_eq!(format_time_ago(now - ChronoDuration::hours(5), now), "5h ago");
        assert_eq!(format_time_ago(now - ChronoDuration::days(3), now), "3d ago");
        assert_eq!(format_time_ago(now + ChronoDuration::hours(1), now), "0m ago");
    }

    #[test]
    fn fallback_filters_by_country_and_category() {
        let all = fallback::articles(Utc::now());
        assert_eq!(all.len(), 8);
        assert_eq!(by_country(&all, Jurisdiction::CA).len(), 3);
        assert_eq!(by_category(&all, NewsCategory::Tariff).len(), 3);
        assert!(all.iter().all(|a| fallback::is_fallback_id(&a.id)));
    }
}
