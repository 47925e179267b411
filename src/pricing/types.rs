// src/pricing/types.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Commodity, CommodityCategory};

/// A raw quote as reported by one upstream provider, already converted to the
/// catalog's canonical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderQuote {
    pub price: f64,
    /// Provider-reported daily change, when the provider has one.
    pub change_percent: Option<f64>,
    pub as_of: Option<DateTime<Utc>>,
}

impl ProviderQuote {
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// "Fetch a quote for an external symbol", one implementation per upstream.
///
/// Implementations never error: network failures, HTTP errors, rate-limit
/// notices and malformed payloads are logged and reported as `None`, which
/// callers read as "try the next provider".
#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// The provider's own symbol for a catalog id, `None` when not covered.
    fn symbol_for(&self, item_id: &str) -> Option<&'static str>;

    /// Unconfigured providers are skipped by the resolver.
    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_quote(&self, symbol: &str) -> Option<ProviderQuote>;

    /// One lightweight request; `true` when the provider answered with usable data.
    async fn probe(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Strictly positive is up; zero counts as down.
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Api,
    Simulated,
}

/// One resolved price merged with its catalog attributes. Derived on every
/// resolution cycle, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedQuote {
    pub item_id: &'static str,
    pub name: &'static str,
    pub category: CommodityCategory,
    pub unit: &'static str,
    pub exchange: &'static str,
    pub price: f64,
    pub change_percent: f64,
    pub trend: Trend,
    pub provenance: Provenance,
    /// Name of the provider that supplied the price; `None` for simulated prices.
    pub provider: Option<&'static str>,
    pub observed_at: DateTime<Utc>,
}

impl ResolvedQuote {
    pub fn new(
        commodity: &'static Commodity,
        price: f64,
        change_percent: f64,
        provider: Option<&'static str>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id: commodity.id,
            name: commodity.name,
            category: commodity.category,
            unit: commodity.unit,
            exchange: commodity.exchange,
            price,
            change_percent,
            trend: Trend::from_change(change_percent),
            provenance: if provider.is_some() {
                Provenance::Api
            } else {
                Provenance::Simulated
            },
            provider,
            observed_at,
        }
    }
}
