// src/news/classify.rs
//! Keyword rules that bucket a headline by country, category and impact.
//!
//! Matching is case-insensitive and word-bounded. Within each field the rules
//! are checked in order and the first hit wins; unmatched text falls back to
//! US / policy / medium.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::news::types::{Impact, NewsCategory};
use crate::tariffs::Jurisdiction;

fn rule(pattern: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{pattern})\b")).expect("classification regex")
}

static COUNTRY_RULES: Lazy<Vec<(Jurisdiction, Regex)>> = Lazy::new(|| {
    vec![
        (Jurisdiction::CA, rule(r"canada|canadian|canadians")),
        (Jurisdiction::US, rule(r"united states|us|u\.s|america|american|americans")),
        (Jurisdiction::EU, rule(r"european union|eu|brussels")),
        (Jurisdiction::CN, rule(r"china|chinese|beijing")),
    ]
});

static CATEGORY_RULES: Lazy<Vec<(NewsCategory, Regex)>> = Lazy::new(|| {
    vec![
        (NewsCategory::Tariff, rule(r"tariff\w*|duty|duties")),
        (NewsCategory::Trade, rule(r"trade\w*|trading|import\w*|export\w*")),
        (
            NewsCategory::Commodity,
            rule(r"commodit(?:y|ies)|steel|alumin(?:um|ium)|copper|nickel|zinc|metals?|crude|oil|wheat|corn|soybeans?|gold|silver"),
        ),
    ]
});

static IMPACT_RULES: Lazy<Vec<(Impact, Regex)>> = Lazy::new(|| {
    vec![
        (Impact::High, rule(r"crisis|war|wars|major|significant|massive|critical")),
        (Impact::Low, rule(r"minor|small|slight|limited")),
    ]
});

/// Countries news is kept for.
pub const SUPPORTED_COUNTRIES: [Jurisdiction; 3] =
    [Jurisdiction::US, Jurisdiction::CA, Jurisdiction::EU];

pub fn is_supported(country: Jurisdiction) -> bool {
    SUPPORTED_COUNTRIES.contains(&country)
}

fn first_match<T: Copy>(rules: &[(T, Regex)], text: &str, default: T) -> T {
    rules
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(v, _)| *v)
        .unwrap_or(default)
}

pub fn country(text: &str) -> Jurisdiction {
    first_match(&COUNTRY_RULES, text, Jurisdiction::US)
}

pub fn category(text: &str) -> NewsCategory {
    first_match(&CATEGORY_RULES, text, NewsCategory::Policy)
}

pub fn impact(text: &str) -> Impact {
    first_match(&IMPACT_RULES, text, Impact::Medium)
}

/// Classify a headline from its title and summary.
pub fn classify(title: &str, summary: &str) -> (Jurisdiction, NewsCategory, Impact) {
    let text = format!("{title} {summary}");
    (country(&text), category(&text), impact(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_rules_in_order() {
        assert_eq!(country("Canadian lumber exporters"), Jurisdiction::CA);
        // CA is checked before US
        assert_eq!(country("Canada and the United States"), Jurisdiction::CA);
        assert_eq!(country("U.S. importers brace"), Jurisdiction::US);
        assert_eq!(country("Brussels weighs response"), Jurisdiction::EU);
        assert_eq!(country("Beijing retaliates"), Jurisdiction::CN);
        assert_eq!(country("Markets drift"), Jurisdiction::US);
        // word-bounded: "focus" does not contain the word "us"
        assert_eq!(country("Chinese focus"), Jurisdiction::CN);
    }

    #[test]
    fn category_rules() {
        assert_eq!(category("New TARIFFS announced"), NewsCategory::Tariff);
        assert_eq!(category("Customs duty on imports"), NewsCategory::Tariff);
        assert_eq!(category("Export controls tighten"), NewsCategory::Trade);
        assert_eq!(category("Copper rallies"), NewsCategory::Commodity);
        assert_eq!(category("Minister resigns"), NewsCategory::Policy);
    }

    #[test]
    fn impact_rules() {
        assert_eq!(impact("A major shift"), Impact::High);
        assert_eq!(impact("Trade war escalates"), Impact::High);
        assert_eq!(impact("A slight adjustment"), Impact::Low);
        assert_eq!(impact("Officials warn of delays"), Impact::Medium);
    }

    #[test]
    fn classification_is_pure() {
        let a = classify("Canada faces major steel tariffs", "Ottawa responds");
        let b = classify("Canada faces major steel tariffs", "Ottawa responds");
        assert_eq!(a, b);
        assert_eq!(a, (Jurisdiction::CA, NewsCategory::Tariff, Impact::High));
    }
}
