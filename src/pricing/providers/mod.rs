// src/pricing/providers/mod.rs
pub mod alpha_vantage;
pub mod metals_api;

use std::time::Duration;

pub use alpha_vantage::AlphaVantageProvider;
pub use metals_api::MetalsApiProvider;

/// Shared client settings for upstream REST calls.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("commodity-tracker/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(4))
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "custom http client failed to build; using defaults");
            reqwest::Client::new()
        })
}

pub(crate) fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
