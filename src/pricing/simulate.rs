// src/pricing/simulate.rs
//! Synthetic prices used when no provider delivers a quote.

use rand::Rng;

use crate::catalog::Commodity;

/// Maximum relative deviation from the catalog base price.
pub const MAX_VARIATION: f64 = 0.01;

/// `base_price * (1 + u)` with `u` uniform in `[-1%, +1%]`, rounded to the unit's precision.
pub fn simulated_price(commodity: &Commodity) -> f64 {
    let variation = rand::rng().random_range(-MAX_VARIATION..=MAX_VARIATION);
    simulated_price_with(commodity, variation)
}

/// Deterministic core of [`simulated_price`]; `variation` is clamped to the allowed band.
pub fn simulated_price_with(commodity: &Commodity, variation: f64) -> f64 {
    let v = variation.clamp(-MAX_VARIATION, MAX_VARIATION);
    round_to(commodity.base_price * (1.0 + v), commodity.price_decimals())
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
