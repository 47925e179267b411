// src/config/tracker.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog;

pub const ENV_TRACKER_CONFIG_PATH: &str = "TRACKER_CONFIG_PATH";
pub const DEFAULT_TRACKER_CONFIG_PATH: &str = "config/tracker.toml";

const DEFAULT_MAX_TRACKED: usize = 12;
const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 8_000;
const DEFAULT_NEWS_LIMIT: usize = 8;

/// Dashboard settings loaded from TOML. Every field is optional in the file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Commodity ids tracked at startup and after a reset.
    pub default_tracked: Vec<String>,
    pub max_tracked: usize,
    /// Upper bound for a single provider call before it counts as failed.
    pub provider_timeout_ms: u64,
    pub news_limit: usize,
    /// Topical search queries sent to the news provider, in order.
    pub news_queries: Vec<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_tracked: ["steel", "copper", "aluminum", "pvc"]
                .map(String::from)
                .to_vec(),
            max_tracked: DEFAULT_MAX_TRACKED,
            provider_timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
            news_limit: DEFAULT_NEWS_LIMIT,
            news_queries: ["tariff trade canada us", "trade war tariff", "customs duty import"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl TrackerConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: TrackerConfig = toml::from_str(s).context("parsing tracker config toml")?;
        Ok(cfg.sanitized())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading tracker config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using env var + fallbacks:
    /// 1) $TRACKER_CONFIG_PATH (must exist)
    /// 2) config/tracker.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_TRACKER_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("TRACKER_CONFIG_PATH points to non-existent path"));
        }
        let default_p = PathBuf::from(DEFAULT_TRACKER_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::default())
    }

    /// Replace zero limits/timeouts with defaults, drop blank or repeated
    /// entries and tracked ids the catalog does not know.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.max_tracked == 0 {
            self.max_tracked = defaults.max_tracked;
        }
        if self.provider_timeout_ms == 0 {
            self.provider_timeout_ms = defaults.provider_timeout_ms;
        }
        if self.news_limit == 0 {
            self.news_limit = defaults.news_limit;
        }
        self.default_tracked = clean_list(self.default_tracked)
            .into_iter()
            .filter(|id| {
                let known = catalog::by_id(id).is_some();
                if !known {
                    tracing::warn!(item_id = %id, "unknown commodity in default_tracked; skipped");
                }
                known
            })
            .collect();
        self.default_tracked.truncate(self.max_tracked);
        if self.default_tracked.is_empty() {
            self.default_tracked = defaults.default_tracked;
        }
        self.news_queries = clean_list(self.news_queries);
        self
    }
}

/// Trim, drop empties and duplicates while keeping first-seen order.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}
