//! # Tariff Schedule
//! Read-only HS-code table with per-jurisdiction rates.

use serde::Serialize;

/// Jurisdictions that publish rates in the table. The first three are also
/// the countries news headlines are bucketed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Jurisdiction {
    US,
    CA,
    EU,
    CN,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 4] = [
        Jurisdiction::US,
        Jurisdiction::CA,
        Jurisdiction::EU,
        Jurisdiction::CN,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Jurisdiction::US => "US",
            Jurisdiction::CA => "CA",
            Jurisdiction::EU => "EU",
            Jurisdiction::CN => "CN",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Jurisdiction::US => "United States",
            Jurisdiction::CA => "Canada",
            Jurisdiction::EU => "European Union",
            Jurisdiction::CN => "China",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|j| j.code().eq_ignore_ascii_case(code.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateStatus {
    Active,
    Pending,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JurisdictionRate {
    pub jurisdiction: Jurisdiction,
    /// Percent ad valorem.
    pub rate: f64,
    pub effective_date: &'static str,
    pub status: RateStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TariffRecord {
    pub hs_code: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub base_rate: f64,
    pub rates: &'static [JurisdictionRate],
    pub unit: &'static str,
    pub notes: &'static str,
}

impl TariffRecord {
    pub fn rate_for(&self, j: Jurisdiction) -> Option<&JurisdictionRate> {
        self.rates.iter().find(|r| r.jurisdiction == j)
    }
}

macro_rules! active {
    ($j:ident, $rate:expr) => {
        JurisdictionRate {
            jurisdiction: $j,
            rate: $rate,
            effective_date: "2024-01-01",
            status: RateStatus::Active,
        }
    };
}

const fn record(
    hs_code: &'static str,
    description: &'static str,
    category: &'static str,
    rates: &'static [JurisdictionRate],
    notes: &'static str,
) -> TariffRecord {
    TariffRecord {
        hs_code,
        description,
        category,
        base_rate: 0.0,
        rates,
        unit: "ad valorem",
        notes,
    }
}

use Jurisdiction::{CA, CN, EU, US};

pub static TARIFFS: &[TariffRecord] = &[
    record(
        "7326.90.8688",
        "Other articles of iron or steel, forged",
        "Iron & Steel Products",
        &[active!(US, 25.0), active!(CA, 0.0), active!(EU, 6.5), active!(CN, 15.0)],
        "Subject to Section 232 steel tariffs",
    ),
    record(
        "8481.80.10.50",
        "Taps, cocks, valves and similar appliances, of brass",
        "Valves & Fittings",
        &[active!(US, 0.0), active!(CA, 0.0), active!(EU, 2.7), active!(CN, 12.0)],
        "Brass valves and fittings",
    ),
    record(
        "8481.80.00",
        "Other appliances for pipes, boiler shells, tanks, vats",
        "Pipe Fittings",
        &[active!(US, 0.0), active!(CA, 0.0), active!(EU, 1.7), active!(CN, 10.0)],
        "General pipe fittings and appliances",
    ),
    record(
        "7419.80.5010",
        "Other articles of copper, cast, molded, stamped or forged",
        "Copper Products",
        &[active!(US, 0.0), active!(CA, 0.0), active!(EU, 4.0), active!(CN, 8.0)],
        "Copper fittings and components",
    ),
    record(
        "7419.99.50.10",
        "Other articles of copper, other",
        "Copper Products",
        &[active!(US, 0.0), active!(CA, 0.0), active!(EU, 4.0), active!(CN, 8.0)],
        "Miscellaneous copper articles",
    ),
    record(
        "3926.90.99.90",
        "Other articles of plastics and articles of other materials",
        "Plastic Products",
        &[active!(US, 5.3), active!(CA, 0.0), active!(EU, 6.5), active!(CN, 15.0)],
        "Plastic fittings and components",
    ),
    record(
        "3917.23.00",
        "Tubes, pipes and hoses, rigid, of polymers of vinyl chloride",
        "PVC Pipes",
        &[active!(US, 5.3), active!(CA, 0.0), active!(EU, 6.5), active!(CN, 10.0)],
        "PVC pipes and tubing",
    ),
];

pub fn by_hs_code(hs_code: &str) -> Option<&'static TariffRecord> {
    TARIFFS.iter().find(|t| t.hs_code == hs_code.trim())
}

pub fn by_category(category: &str) -> Vec<&'static TariffRecord> {
    TARIFFS.iter().filter(|t| t.category == category).collect()
}

/// HS codes match on the raw query; description and category match case-insensitively.
pub fn search(query: &str) -> Vec<&'static TariffRecord> {
    let lower = query.to_lowercase();
    TARIFFS
        .iter()
        .filter(|t| {
            t.hs_code.contains(query)
                || t.description.to_lowercase().contains(&lower)
                || t.category.to_lowercase().contains(&lower)
        })
        .collect()
}

/// Sorted, de-duplicated category names.
pub fn categories() -> Vec<&'static str> {
    use std::collections::BTreeSet;
    TARIFFS
        .iter()
        .map(|t| t.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn by_jurisdiction_rate(j: Jurisdiction, min_rate: f64) -> Vec<&'static TariffRecord> {
    TARIFFS
        .iter()
        .filter(|t| t.rate_for(j).is_some_and(|r| r.rate >= min_rate))
        .collect()
}

pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hs_lookup_and_rates() {
        let t = by_hs_code("7326.90.8688").expect("steel record");
        assert_eq!(t.rate_for(Jurisdiction::US).map(|r| r.rate), Some(25.0));
        assert_eq!(format_rate(t.rate_for(Jurisdiction::EU).unwrap().rate), "6.5%");
        assert!(by_hs_code("0000.00").is_none());
    }

    #[test]
    fn search_by_code_and_text() {
        assert_eq!(search("8481.80").len(), 2);
        assert_eq!(search("COPPER").len(), 2);
        assert_eq!(search("pvc").len(), 1);
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let cats = categories();
        assert_eq!(cats.len(), 6);
        let mut sorted = cats.clone();
        sorted.sort_unstable();
        assert_eq!(cats, sorted);
        assert_eq!(by_category("Copper Products").len(), 2);
    }

    #[test]
    fn jurisdiction_min_rate_filter() {
        let us = by_jurisdiction_rate(Jurisdiction::US, 5.0);
        assert_eq!(us.len(), 3);
        assert_eq!(by_jurisdiction_rate(Jurisdiction::CA, 0.0).len(), TARIFFS.len());
        assert!(by_jurisdiction_rate(Jurisdiction::CA, 0.1).is_empty());
        assert_eq!(Jurisdiction::from_code("eu"), Some(Jurisdiction::EU));
    }
}
