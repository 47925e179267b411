//! # Commodity Catalog
//! Static reference data for every commodity the dashboard can track.
//!
//! Entries are immutable and live for the whole process. Price resolution
//! looks items up here first; ids that are not in the catalog are skipped.

use serde::Serialize;

/// Broad grouping used for filtering and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommodityCategory {
    Metals,
    Energy,
    Agriculture,
    PreciousMetals,
    Plastics,
}

impl CommodityCategory {
    pub const ALL: [CommodityCategory; 5] = [
        CommodityCategory::Metals,
        CommodityCategory::Energy,
        CommodityCategory::Agriculture,
        CommodityCategory::PreciousMetals,
        CommodityCategory::Plastics,
    ];

    /// Machine key, e.g. `precious_metals`.
    pub fn key(self) -> &'static str {
        match self {
            CommodityCategory::Metals => "metals",
            CommodityCategory::Energy => "energy",
            CommodityCategory::Agriculture => "agriculture",
            CommodityCategory::PreciousMetals => "precious_metals",
            CommodityCategory::Plastics => "plastics",
        }
    }

    /// Human label shown in the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            CommodityCategory::Metals => "Industrial Metals",
            CommodityCategory::Energy => "Energy",
            CommodityCategory::Agriculture => "Agriculture",
            CommodityCategory::PreciousMetals => "Precious Metals",
            CommodityCategory::Plastics => "Plastics & Polymers",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key.trim()))
    }
}

/// One tracked item's reference attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commodity {
    pub id: &'static str,
    pub name: &'static str,
    pub category: CommodityCategory,
    pub base_price: f64,
    /// Canonical unit, currency per physical unit (e.g. `USD/lb`).
    pub unit: &'static str,
    pub description: &'static str,
    pub exchange: &'static str,
}

impl Commodity {
    /// Small per-pound prices are quoted with four decimals, everything else with two.
    pub fn price_decimals(&self) -> u32 {
        if self.unit.contains("USD/lb") {
            4
        } else {
            2
        }
    }
}

const fn item(
    id: &'static str,
    name: &'static str,
    category: CommodityCategory,
    base_price: f64,
    unit: &'static str,
    description: &'static str,
    exchange: &'static str,
) -> Commodity {
    Commodity {
        id,
        name,
        category,
        base_price,
        unit,
        description,
        exchange,
    }
}

use CommodityCategory::*;

pub static COMMODITIES: &[Commodity] = &[
    // Industrial metals
    item("steel", "Steel", Metals, 2949.00, "CNY/ton", "Hot-rolled steel coil", "Shanghai Futures Exchange"),
    item("copper", "Copper", Metals, 4.8129, "USD/lb", "High-grade copper cathode", "London Metal Exchange"),
    item("aluminum", "Aluminum", Metals, 2453.40, "USD/ton", "Primary aluminum ingot", "London Metal Exchange"),
    item("nickel", "Nickel", Metals, 16850.00, "USD/ton", "Primary nickel", "London Metal Exchange"),
    item("zinc", "Zinc", Metals, 2890.50, "USD/ton", "Special high-grade zinc", "London Metal Exchange"),
    item("lead", "Lead", Metals, 2156.00, "USD/ton", "Refined lead", "London Metal Exchange"),
    item("tin", "Tin", Metals, 29450.00, "USD/ton", "High-grade tin", "London Metal Exchange"),
    // Plastics
    item("pvc", "PVC", Plastics, 4687.00, "CNY/ton", "Polyvinyl chloride resin", "Dalian Commodity Exchange"),
    // Energy
    item("crude_oil", "Crude Oil", Energy, 78.45, "USD/barrel", "WTI Crude Oil", "NYMEX"),
    item("natural_gas", "Natural Gas", Energy, 2.85, "USD/MMBtu", "Henry Hub Natural Gas", "NYMEX"),
    item("heating_oil", "Heating Oil", Energy, 2.45, "USD/gallon", "No. 2 Heating Oil", "NYMEX"),
    // Agriculture
    item("wheat", "Wheat", Agriculture, 6.25, "USD/bushel", "Hard Red Winter Wheat", "CBOT"),
    item("corn", "Corn", Agriculture, 4.85, "USD/bushel", "No. 2 Yellow Corn", "CBOT"),
    item("soybeans", "Soybeans", Agriculture, 12.75, "USD/bushel", "No. 1 Yellow Soybeans", "CBOT"),
    // Precious metals
    item("gold", "Gold", PreciousMetals, 2045.50, "USD/oz", "100 oz Gold Bar", "COMEX"),
    item("silver", "Silver", PreciousMetals, 24.85, "USD/oz", "5000 oz Silver Bar", "COMEX"),
    item("platinum", "Platinum", PreciousMetals, 1025.00, "USD/oz", "50 oz Platinum Bar", "NYMEX"),
];

pub fn by_id(id: &str) -> Option<&'static Commodity> {
    COMMODITIES.iter().find(|c| c.id == id)
}

pub fn by_category(category: CommodityCategory) -> Vec<&'static Commodity> {
    COMMODITIES.iter().filter(|c| c.category == category).collect()
}

/// Case-insensitive substring search over name, description and category key.
pub fn search(query: &str) -> Vec<&'static Commodity> {
    let q = query.trim().to_lowercase();
    COMMODITIES
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&q)
                || c.description.to_lowercase().contains(&q)
                || c.category.key().contains(&q)
        })
        .collect()
}

/// `(key, label)` pairs in display order.
pub fn categories() -> Vec<(&'static str, &'static str)> {
    CommodityCategory::ALL
        .iter()
        .map(|c| (c.key(), c.label()))
        .collect()
}
