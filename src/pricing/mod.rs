// src/pricing/mod.rs
pub mod providers;
pub mod simulate;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::catalog;
use crate::config::{Credentials, Endpoints};
use crate::fallback::first_success;
use crate::history::PriceHistory;
use crate::pricing::providers::{AlphaVantageProvider, MetalsApiProvider};
use crate::pricing::types::{Provenance, ProviderQuote, QuoteProvider, ResolvedQuote};

pub type DynQuoteProvider = Arc<dyn QuoteProvider>;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "pricing_quotes_total",
            "Resolved quotes, labelled by provenance (api|simulated)."
        );
        describe_counter!(
            "pricing_provider_errors_total",
            "Quote provider fetch/parse errors."
        );
        describe_counter!(
            "pricing_provider_timeouts_total",
            "Quote provider calls abandoned after the provider timeout."
        );
        describe_histogram!(
            "pricing_resolve_ms",
            "Wall time of one price resolution cycle in milliseconds."
        );
    });
}

/// Resolves catalog ids to quotes: providers in priority order, then a
/// simulated price, with every result fed through the shared [`PriceHistory`].
pub struct PriceResolver {
    providers: Vec<DynQuoteProvider>,
    history: Arc<PriceHistory>,
    provider_timeout: Duration,
}

impl PriceResolver {
    /// `providers` are tried in the given order for every item they cover.
    pub fn new(
        providers: Vec<DynQuoteProvider>,
        history: Arc<PriceHistory>,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            history,
            provider_timeout,
        }
    }

    /// Metals-API first, then Alpha Vantage. The symbol tables do not overlap,
    /// so each covered item ends up with exactly one live candidate.
    pub fn default_providers(creds: &Credentials, endpoints: &Endpoints) -> Vec<DynQuoteProvider> {
        vec![
            Arc::new(MetalsApiProvider::with_base_url(
                creds.metals_api.clone(),
                endpoints.metals_api.clone(),
            )),
            Arc::new(AlphaVantageProvider::with_base_url(
                creds.alpha_vantage.clone(),
                endpoints.alpha_vantage.clone(),
            )),
        ]
    }

    pub fn history(&self) -> &Arc<PriceHistory> {
        &self.history
    }

    pub fn providers(&self) -> &[DynQuoteProvider] {
        &self.providers
    }

    /// Configured providers covering `item_id`, with the symbol each one uses.
    pub fn candidates_for(&self, item_id: &str) -> Vec<(&DynQuoteProvider, &'static str)> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .filter_map(|p| p.symbol_for(item_id).map(|sym| (p, sym)))
            .collect()
    }

    /// Walk the provider chain for `item_id`; first valid quote wins.
    pub async fn fetch_live(&self, item_id: &str) -> Option<(&'static str, ProviderQuote)> {
        first_success(self.candidates_for(item_id), |(provider, symbol)| async move {
            let name = provider.name();
            match tokio::time::timeout(self.provider_timeout, provider.fetch_quote(symbol)).await
            {
                Ok(Some(q)) if q.is_valid() => Some((name, q)),
                Ok(Some(q)) => {
                    tracing::warn!(provider = name, symbol, price = q.price, "discarding invalid quote");
                    None
                }
                Ok(None) => None,
                Err(_) => {
                    tracing::warn!(
                        provider = name,
                        symbol,
                        timeout_ms = self.provider_timeout.as_millis() as u64,
                        "provider timed out"
                    );
                    counter!("pricing_provider_timeouts_total", "provider" => name).increment(1);
                    None
                }
            }
        })
        .await
    }

    /// Resolve one id. Unknown ids yield `None`; everything else yields a quote,
    /// simulated when no provider delivered.
    pub async fn resolve_one(&self, item_id: &str) -> Option<ResolvedQuote> {
        let Some(commodity) = catalog::by_id(item_id) else {
            tracing::debug!(item_id, "unknown commodity id skipped");
            return None;
        };

        let (price, provider, observed_at) = match self.fetch_live(item_id).await {
            Some((name, q)) => (q.price, Some(name), q.as_of.unwrap_or_else(Utc::now)),
            None => (simulate::simulated_price(commodity), None, Utc::now()),
        };

        let change = self.history.update(commodity.id, price);
        let quote = ResolvedQuote::new(commodity, price, change, provider, observed_at);

        let provenance = match quote.provenance {
            Provenance::Api => "api",
            Provenance::Simulated => "simulated",
        };
        counter!("pricing_quotes_total", "provenance" => provenance).increment(1);
        Some(quote)
    }

    /// Resolve all ids concurrently and wait for every one of them. Output
    /// order follows input order with unknown ids dropped.
    pub async fn resolve_prices<S: AsRef<str>>(&self, item_ids: &[S]) -> Vec<ResolvedQuote> {
        ensure_metrics_described();
        let t0 = Instant::now();

        let quotes: Vec<ResolvedQuote> =
            futures::future::join_all(item_ids.iter().map(|id| self.resolve_one(id.as_ref())))
                .await
                .into_iter()
                .flatten()
                .collect();

        let api = quotes
            .iter()
            .filter(|q| q.provenance == Provenance::Api)
            .count();
        histogram!("pricing_resolve_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        tracing::info!(
            requested = item_ids.len(),
            resolved = quotes.len(),
            api,
            simulated = quotes.len() - api,
            "price resolution finished"
        );
        quotes
    }

    /// `{provider name → configured}` for every quote provider.
    pub fn configuration(&self) -> BTreeMap<&'static str, bool> {
        self.providers
            .iter()
            .map(|p| (p.name(), p.is_configured()))
            .collect()
    }

    /// Probe every provider concurrently; `{provider name → reachable}`.
    pub async fn probe_all(&self) -> BTreeMap<&'static str, bool> {
        let probes = self.providers.iter().map(|p| async move {
            let ok = tokio::time::timeout(self.provider_timeout, p.probe())
                .await
                .unwrap_or(false);
            (p.name(), ok)
        });
        futures::future::join_all(probes).await.into_iter().collect()
    }
}
