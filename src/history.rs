//! history.rs: last-two-samples price memory per tracked item.
//!
//! Only the previous and current price are kept; every update shifts
//! `current → previous`. The whole map sits behind one mutex so concurrent
//! resolution cycles for the same item cannot lose an update.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSample {
    pub previous: f64,
    pub current: f64,
    /// Percent change computed by the update that stored `current`.
    pub change_percent: f64,
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct PriceHistory {
    inner: Mutex<HashMap<String, PriceSample>>,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `price` for `item_id` and return the percent change against the
    /// previously stored current price. First-ever updates return `0.0`, as
    /// does a change measured against a stored price of zero.
    pub fn update(&self, item_id: &str, price: f64) -> f64 {
        let now = Utc::now();
        let mut map = self.inner.lock().expect("price history mutex poisoned");

        match map.entry(item_id.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(PriceSample {
                    previous: price,
                    current: price,
                    change_percent: 0.0,
                    observed_at: now,
                });
                0.0
            }
            Entry::Occupied(mut slot) => {
                let sample = slot.get_mut();
                let change = percent_change(sample.current, price);
                sample.previous = sample.current;
                sample.current = price;
                sample.change_percent = change;
                sample.observed_at = now;
                change
            }
        }
    }

    /// Last computed change for `item_id`, `0.0` when unknown. Does not mutate.
    pub fn peek(&self, item_id: &str) -> f64 {
        let map = self.inner.lock().expect("price history mutex poisoned");
        map.get(item_id).map(|s| s.change_percent).unwrap_or(0.0)
    }

    pub fn sample(&self, item_id: &str) -> Option<PriceSample> {
        let map = self.inner.lock().expect("price history mutex poisoned");
        map.get(item_id).cloned()
    }

    /// Forget `item_id`; its next update behaves as a first-ever update.
    pub fn remove(&self, item_id: &str) -> Option<PriceSample> {
        let mut map = self.inner.lock().expect("price history mutex poisoned");
        map.remove(item_id)
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .expect("price history mutex poisoned")
            .clear();
    }

    /// Ids with a stored sample, sorted.
    pub fn tracked_ids(&self) -> Vec<String> {
        let map = self.inner.lock().expect("price history mutex poisoned");
        let mut ids: Vec<String> = map.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("price history mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn percent_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return 0.0;
    }
    let pct = (new - old) / old * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}
