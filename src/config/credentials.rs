// src/config/credentials.rs
use serde::Serialize;
use std::fmt;

pub const ENV_ALPHAVANTAGE_KEY: &str = "ALPHAVANTAGE_API_KEY";
pub const ENV_METALS_API_KEY: &str = "METALS_API_KEY";
pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";

pub const ENV_ALPHAVANTAGE_BASE_URL: &str = "ALPHAVANTAGE_BASE_URL";
pub const ENV_METALS_API_BASE_URL: &str = "METALS_API_BASE_URL";
pub const ENV_NEWS_API_BASE_URL: &str = "NEWS_API_BASE_URL";

pub const DEFAULT_ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_METALS_API_BASE_URL: &str = "https://metals-api.com/api";
pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org";

/// Literal value shipped in sample `.env` files; treated as "no key".
const PLACEHOLDER_KEY: &str = "demo";

/// Upstream API keys. `None` means the provider is unconfigured.
#[derive(Clone, Default)]
pub struct Credentials {
    pub alpha_vantage: Option<String>,
    pub metals_api: Option<String>,
    pub news_api: Option<String>,
}

impl Credentials {
    /// Read keys from the process environment (call `dotenvy::dotenv()` first in binaries).
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            alpha_vantage: usable_key(lookup(ENV_ALPHAVANTAGE_KEY)),
            metals_api: usable_key(lookup(ENV_METALS_API_KEY)),
            news_api: usable_key(lookup(ENV_NEWS_API_KEY)),
        }
    }
}

// Keys never reach logs; only their presence does.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("alpha_vantage", &self.alpha_vantage.is_some())
            .field("metals_api", &self.metals_api.is_some())
            .field("news_api", &self.news_api.is_some())
            .finish()
    }
}

/// Blank and placeholder values count as absent.
pub fn usable_key(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    let t = raw.trim();
    if t.is_empty() || is_placeholder(t) {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn is_placeholder(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case(PLACEHOLDER_KEY)
}

/// Base URLs of the upstream APIs; overridable so tests can point at local stubs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub alpha_vantage: String,
    pub metals_api: String,
    pub news_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            alpha_vantage: DEFAULT_ALPHAVANTAGE_BASE_URL.to_string(),
            metals_api: DEFAULT_METALS_API_BASE_URL.to_string(),
            news_api: DEFAULT_NEWS_API_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn from_env() -> Self {
        let pick = |key: &str, default: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            alpha_vantage: pick(ENV_ALPHAVANTAGE_BASE_URL, DEFAULT_ALPHAVANTAGE_BASE_URL),
            metals_api: pick(ENV_METALS_API_BASE_URL, DEFAULT_METALS_API_BASE_URL),
            news_api: pick(ENV_NEWS_API_BASE_URL, DEFAULT_NEWS_API_BASE_URL),
        }
    }
}

/// Configuration status of one provider, as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyStatus {
    pub configured: bool,
    pub key: &'static str,
}

impl KeyStatus {
    pub fn of(configured: bool) -> Self {
        Self {
            configured,
            key: if configured {
                "API key configured"
            } else {
                "Using demo key"
            },
        }
    }
}
