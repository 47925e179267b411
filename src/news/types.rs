// src/news/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tariffs::Jurisdiction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Tariff,
    Trade,
    Policy,
    Commodity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// A headline straight from a provider, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArticle {
    /// Provider-assigned id (the article URL for NewsAPI).
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub url: Option<String>,
}

/// A classified headline. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub url: Option<String>,
    pub country: Jurisdiction,
    pub category: NewsCategory,
    pub impact: Impact,
}

/// Headline search against one upstream news API.
#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_configured(&self) -> bool;

    async fn search(&self, query: &str) -> Result<Vec<RawArticle>>;

    /// One lightweight request; `true` when the provider answered 2xx.
    async fn probe(&self) -> bool;
}
