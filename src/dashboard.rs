//! Dashboard composition root.
//!
//! Owns the shared price history, both resolvers and the user's tracked set.
//! Handlers hold it behind an `Arc`; every method takes `&self`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::catalog;
use crate::config::{Credentials, Endpoints, KeyStatus, TrackerConfig};
use crate::history::PriceHistory;
use crate::news::providers::NewsApiProvider;
use crate::news::types::NewsArticle;
use crate::news::{DynNewsProvider, NewsResolver};
use crate::pricing::types::ResolvedQuote;
use crate::pricing::{DynQuoteProvider, PriceResolver};

pub struct Dashboard {
    config: TrackerConfig,
    prices: PriceResolver,
    news: NewsResolver,
    tracked: Mutex<Vec<String>>,
}

impl Dashboard {
    /// Keys and base URLs from the environment, settings from
    /// [`TrackerConfig::load_default`]. A broken config file is logged and
    /// replaced by defaults.
    pub fn from_env() -> Self {
        let creds = Credentials::from_env();
        let endpoints = Endpoints::from_env();
        let config = TrackerConfig::load_default().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "tracker config unusable; using defaults");
            TrackerConfig::default()
        });
        tracing::info!(?creds, max_tracked = config.max_tracked, "dashboard configured");

        let quote_providers = PriceResolver::default_providers(&creds, &endpoints);
        let news_provider: DynNewsProvider = Arc::new(NewsApiProvider::with_base_url(
            creds.news_api.clone(),
            endpoints.news_api.clone(),
        ));
        Self::with_parts(config, quote_providers, Some(news_provider))
    }

    pub fn with_parts(
        config: TrackerConfig,
        quote_providers: Vec<DynQuoteProvider>,
        news_provider: Option<DynNewsProvider>,
    ) -> Self {
        let config = config.sanitized();
        let history = Arc::new(PriceHistory::new());
        let timeout = config.provider_timeout();
        let prices = PriceResolver::new(quote_providers, history, timeout);
        let news = NewsResolver::new(
            news_provider,
            config.news_queries.clone(),
            config.news_limit,
            timeout,
        );
        let tracked = Mutex::new(config.default_tracked.clone());
        Self {
            config,
            prices,
            news,
            tracked,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn history(&self) -> &Arc<PriceHistory> {
        self.prices.history()
    }

    pub async fn resolve_prices<S: AsRef<str>>(&self, item_ids: &[S]) -> Vec<ResolvedQuote> {
        self.prices.resolve_prices(item_ids).await
    }

    pub async fn resolve_news(&self) -> Vec<NewsArticle> {
        self.news.resolve_news().await
    }

    /// `{metals_api, alpha_vantage, news_api} → {configured, key}`.
    pub fn check_provider_configuration(&self) -> BTreeMap<&'static str, KeyStatus> {
        let mut out: BTreeMap<&'static str, KeyStatus> = self
            .prices
            .configuration()
            .into_iter()
            .map(|(name, ok)| (name, KeyStatus::of(ok)))
            .collect();
        let news_name = self.news.provider().map(|p| p.name()).unwrap_or("news_api");
        out.insert(news_name, KeyStatus::of(self.news.is_configured()));
        out
    }

    /// One probe per provider, all concurrently. Unconfigured providers report `false`.
    pub async fn test_provider_connectivity(&self) -> BTreeMap<&'static str, bool> {
        let (mut out, news_ok) = tokio::join!(self.prices.probe_all(), self.news.probe());
        let news_name = self.news.provider().map(|p| p.name()).unwrap_or("news_api");
        out.insert(news_name, news_ok);
        tracing::info!(results = ?out, "provider connectivity probed");
        out
    }

    /// Current tracked ids in insertion order.
    pub fn tracked(&self) -> Vec<String> {
        self.tracked.lock().expect("tracked set mutex poisoned").clone()
    }

    /// Add a catalog id to the tracked set.
    pub fn track(&self, item_id: &str) -> Result<Vec<String>> {
        let Some(commodity) = catalog::by_id(item_id) else {
            bail!("unknown commodity '{item_id}'");
        };
        let mut set = self.tracked.lock().expect("tracked set mutex poisoned");
        if set.iter().any(|id| id == commodity.id) {
            bail!("'{item_id}' is already tracked");
        }
        if set.len() >= self.config.max_tracked {
            bail!("at most {} commodities can be tracked", self.config.max_tracked);
        }
        set.push(commodity.id.to_string());
        Ok(set.clone())
    }

    /// Remove an id and forget its price history. The last item cannot be removed.
    pub fn untrack(&self, item_id: &str) -> Result<Vec<String>> {
        let mut set = self.tracked.lock().expect("tracked set mutex poisoned");
        let Some(pos) = set.iter().position(|id| id == item_id) else {
            bail!("'{item_id}' is not tracked");
        };
        if set.len() == 1 {
            bail!("at least one commodity must stay tracked");
        }
        set.remove(pos);
        self.prices.history().remove(item_id);
        Ok(set.clone())
    }

    /// Restore the configured defaults. Ids dropped by the reset lose their
    /// price history, as with [`Dashboard::untrack`].
    pub fn reset_tracked(&self) -> Vec<String> {
        let mut set = self.tracked.lock().expect("tracked set mutex poisoned");
        let defaults = &self.config.default_tracked;
        for id in set.iter().filter(|id| !defaults.contains(id)) {
            self.prices.history().remove(id);
        }
        *set = defaults.clone();
        set.clone()
    }

    /// Resolve every tracked id.
    pub async fn refresh_tracked(&self) -> Vec<ResolvedQuote> {
        let ids = self.tracked();
        self.resolve_prices(ids.as_slice()).await
    }
}
