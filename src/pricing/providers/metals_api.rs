// src/pricing/providers/metals_api.rs
use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Deserialize;

use crate::config::credentials::DEFAULT_METALS_API_BASE_URL;
use crate::pricing::types::{ProviderQuote, QuoteProvider};

/// Precious metals use spot symbols, industrial metals the LME contracts.
const SYMBOLS: &[(&str, &str)] = &[
    ("gold", "XAU"),
    ("silver", "XAG"),
    ("platinum", "XPT"),
    ("copper", "LME-XCU"),
    ("aluminum", "LME-ALU"),
    ("nickel", "LME-NI"),
    ("zinc", "LME-ZNC"),
    ("lead", "LME-LEAD"),
    ("tin", "LME-TIN"),
];

/// Raw `USD<symbol>` rate → catalog unit. LME rates are per troy ounce; the
/// multipliers scale them to USD/ton (32150 oz t per metric ton) or, for
/// copper, to USD/lb (14.583 oz t per lb).
const CONVERSIONS: &[(&str, f64)] = &[
    ("LME-ALU", 32_150.0),
    ("LME-XCU", 14.583),
    ("LME-NI", 32_150.0),
    ("LME-ZNC", 32_150.0),
    ("LME-LEAD", 32_150.0),
    ("LME-TIN", 32_150.0),
    ("XAU", 1.0),
    ("XAG", 1.0),
    ("XPT", 1.0),
];

const PROBE_SYMBOL: &str = "XAU";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    success: Option<bool>,
    timestamp: Option<i64>,
    #[serde(default)]
    rates: HashMap<String, f64>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    info: Option<String>,
    message: Option<String>,
}

/// Metals-API `latest` adapter.
pub struct MetalsApiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl MetalsApiProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_METALS_API_BASE_URL)
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

    /// Multiplier applied to the raw rate for `symbol`.
    pub fn multiplier(symbol: &str) -> f64 {
        match CONVERSIONS.iter().find(|(s, _)| *s == symbol) {
            Some((_, m)) => *m,
            None => {
                tracing::warn!(symbol, "no unit conversion for symbol; using raw rate");
                1.0
            }
        }
    }

    async fn try_fetch(&self, symbol: &str) -> Result<ProviderQuote> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("metals-api key not configured"))?;
        let resp = self
            .http
            .get(format!("{}/latest", self.base_url))
            .query(&[("access_key", key), ("symbols", symbol)])
            .send()
            .await
            .context("metals-api http get()")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("metals-api http status {status}");
        }
        let body = resp.text().await.context("metals-api .text()")?;
        parse_latest(&body, symbol)
    }
}

/// Decode a `latest` body and convert the `USD<symbol>` rate to the canonical unit.
pub(crate) fn parse_latest(body: &str, symbol: &str) -> Result<ProviderQuote> {
    let resp: LatestResponse = serde_json::from_str(body).context("parsing metals-api json")?;

    if resp.success == Some(false) {
        let detail = resp
            .error
            .and_then(|e| e.info.or(e.message))
            .unwrap_or_else(|| "unknown error".to_string());
        bail!("metals-api error: {detail}");
    }

    let rate_key = format!("USD{symbol}");
    let raw = *resp.rates.get(&rate_key).ok_or_else(|| {
        let mut available: Vec<&str> = resp.rates.keys().map(String::as_str).collect();
        available.sort_unstable();
        anyhow!(
            "metals-api has no rate for {rate_key} (available: {})",
            available.join(", ")
        )
    })?;

    let out = ProviderQuote {
        price: raw * MetalsApiProvider::multiplier(symbol),
        // the basic plan carries no change data
        change_percent: None,
        as_of: resp
            .timestamp
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
    };
    if !out.is_valid() {
        bail!("metals-api rate out of range for {symbol}: {raw}");
    }
    Ok(out)
}

#[async_trait]
impl QuoteProvider for MetalsApiProvider {
    fn name(&self) -> &'static str {
        "metals_api"
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
