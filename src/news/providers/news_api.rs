// src/news/providers/news_api.rs
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::credentials::DEFAULT_NEWS_API_BASE_URL;
use crate::news::normalize_text;
use crate::news::types::{NewsProvider, RawArticle};

const PAGE_SIZE: &str = "10";
const SUMMARY_FROM_CONTENT_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct Everything {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    source: Option<Source>,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Source {
    name: Option<String>,
}

/// NewsAPI `/v2/everything` search.
pub struct NewsApiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsApiProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_NEWS_API_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: crate::pricing::providers::http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow!("news api key not configured"))
    }
}

/// Decode an `everything` body into raw articles. Articles without a URL or
/// title (including NewsAPI's `[Removed]` placeholders) are skipped.
pub(crate) fn parse_everything(body: &str, now: DateTime<Utc>) -> Result<Vec<RawArticle>> {
    let resp: Everything = serde_json::from_str(body).context("parsing newsapi json")?;
    if resp.status.as_deref() == Some("error") {
        bail!(
            "newsapi error: {}",
            resp.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    let mut out = Vec::with_capacity(resp.articles.len());
    for a in resp.articles {
        let (Some(url), Some(title)) = (a.url, a.title) else {
            continue;
        };
        let title = normalize_text(&title);
        if title.is_empty() || title == "[Removed]" {
            continue;
        }

        let summary = match a.description.filter(|d| !d.trim().is_empty()) {
            Some(d) => normalize_text(&d),
            None => {
                let content = a.content.unwrap_or_default();
                let head: String = content.chars().take(SUMMARY_FROM_CONTENT_CHARS).collect();
                format!("{}...", normalize_text(&head))
            }
        };

        let published_at = a
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(now);

        out.push(RawArticle {
            id: url.clone(),
            title,
            summary,
            source: a
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            published_at,
            url: Some(url),
        });
    }
    Ok(out)
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &'static str {
        "news_api"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str) -> Result<Vec<RawArticle>> {
        let key = self.key()?;
        let resp = self
            .http
            .get(format!("{}/v2/everything", self.base_url))
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", PAGE_SIZE),
                ("apiKey", key),
            ])
            .send()
            .await
            .context("newsapi http get()")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("newsapi http status {status}");
        }
        let body = resp.text().await.context("newsapi .text()")?;
        parse_everything(&body, Utc::now())
    }

    async fn probe(&self) -> bool {
        let Ok(key) = self.key() else {
            return false;
        };
        let res = self
            .http
            .get(format!("{}/v2/everything", self.base_url))
            .query(&[("q", "test"), ("pageSize", "1"), ("apiKey", key)])
            .send()
            .await;
        match res {
            Ok(r) => r.status().is_success(),
            Err(e) => {
                tracing::warn!(error = ?e, provider = self.name(), "probe failed");
                false
            }
        }
    }
}
