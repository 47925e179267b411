// src/pricing/providers/alpha_vantage.rs
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use metrics::counter;
use serde::Deserialize;

use crate::config::credentials::DEFAULT_ALPHAVANTAGE_BASE_URL;
use crate::pricing::types::{ProviderQuote, QuoteProvider};

/// Energy and agricultural commodities.
const SYMBOLS: &[(&str, &str)] = &[
    ("crude_oil", "WTI"),
    ("natural_gas", "NATURAL_GAS"),
    ("heating_oil", "HEATING_OIL"),
    ("wheat", "WHEAT"),
    ("corn", "CORN"),
    ("soybeans", "SOYBEANS"),
];

const PROBE_SYMBOL: &str = "AAPL";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

/// Alpha Vantage `GLOBAL_QUOTE` adapter. Prices are already per canonical unit.
pub struct AlphaVantageProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantageProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_ALPHAVANTAGE_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: super::http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn symbol(item_id: &str) -> Option<&'static str> {
        super::lookup(SYMBOLS, item_id)
    }

    async fn try_fetch(&self, symbol: &str) -> Result<ProviderQuote> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("alpha vantage key not configured"))?;
        let resp = self
            .http
            .get(format!("{}/query", self.base_url))
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", key),
            ])
            .send()
            .await
            .context("alpha vantage http get()")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("alpha vantage http status {status}");
        }
        let body = resp.text().await.context("alpha vantage .text()")?;
        parse_global_quote(&body)
    }
}

/// Decode a `GLOBAL_QUOTE` body. Rate-limit notices and empty quotes are errors.
pub(crate) fn parse_global_quote(body: &str) -> Result<ProviderQuote> {
    let env: Envelope = serde_json::from_str(body).context("parsing alpha vantage json")?;

    if let Some(msg) = env.error_message {
        bail!("alpha vantage error: {msg}");
    }
    if let Some(note) = env.note.or(env.information) {
        bail!("alpha vantage rate limit: {note}");
    }
    let quote = env
        .global_quote
        .ok_or_else(|| anyhow!("alpha vantage response has no quote data"))?;

    let price: f64 = quote
        .price
        .as_deref()
        .ok_or_else(|| anyhow!("alpha vantage quote missing price"))?
        .trim()
        .parse()
        .context("alpha vantage price is not a number")?;

    let change_percent = quote
        .change_percent
        .as_deref()
        .and_then(|s| s.trim().trim_end_matches('%').parse::<f64>().ok());

    let as_of = quote
        .latest_trading_day
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));

    let out = ProviderQuote {
        price,
        change_percent,
        as_of,
    };
    if !out.is_valid() {
        bail!("alpha vantage price out of range: {price}");
    }
    Ok(out)
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    fn symbol_for(&self, item_id: &str) -> Option<&'static str> {
        Self::symbol(item_id)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_quote(&self, symbol: &str) -> Option<ProviderQuote> {
        match self.try_fetch(symbol).await {
            Ok(q) => {
                tracing::debug!(provider = self.name(), symbol, price = q.price, "quote");
                Some(q)
            }
            Err(e) => {
                tracing::warn!(error = ?e, provider = self.name(), symbol, "provider error");
                counter!("pricing_provider_errors_total", "provider" => self.name()).increment(1);
                None
            }
        }
    }

    async fn probe(&self) -> bool {
        if !self.is_configured() {
            return false;
        }
        self.fetch_quote(PROBE_SYMBOL).await.is_some()
    }
}
