// src/news/fallback.rs
//! Curated, pre-classified headlines served when live news is unavailable.

use chrono::{DateTime, Duration, Utc};

use crate::news::types::{Impact, NewsArticle, NewsCategory};
use crate::tariffs::Jurisdiction;

struct Curated {
    id: &'static str,
    title: &'static str,
    summary: &'static str,
    source: &'static str,
    age_minutes: i64,
    country: Jurisdiction,
    category: NewsCategory,
    url: &'static str,
    impact: Impact,
}

const HOUR: i64 = 60;
const DAY: i64 = 24 * HOUR;

const CURATED: &[Curated] = &[
    Curated {
        id: "news_1",
        title: "Trump Says Trade Deal With Canada \"Achievable\" at G-7",
        summary: "US President discusses maintaining tariffs on Canada as negotiators work on trade agreement. Canada faces 25% duties on auto exports and 50% on steel and aluminum.",
        source: "Bloomberg",
        age_minutes: 5 * HOUR,
        country: Jurisdiction::US,
        category: NewsCategory::Tariff,
        url: "https://www.bloomberg.com/news/articles/2025-06-16/trump-says-trade-deal-with-canada-achievable-as-g-7-opens",
        impact: Impact::High,
    },
    Curated {
        id: "news_2",
        title: "Canada Pushes Back on Trump Tariff Requirements",
        summary: "Ottawa challenges Trump's stance that tariffs must be part of any Canada deal. Canada is the top supplier of steel and aluminum to the United States.",
        source: "Reuters",
        age_minutes: 2 * HOUR,
        country: Jurisdiction::CA,
        category: NewsCategory::Trade,
        url: "https://www.reuters.com/business/autos-transportation/trump-says-tariffs-must-be-part-any-canada-deal-ottawa-pushes-back-2025-06-16/",
        impact: Impact::High,
    },
    Curated {
        id: "news_3",
        title: "Progress on Lifting Trump's Tariffs on Canada \"Not Fast Enough\"",
        summary: "Canadian officials express frustration with pace of tariff negotiations. Canada has imposed retaliatory tariffs on $60 billion worth of U.S. goods.",
        source: "Global News",
        age_minutes: DAY,
        country: Jurisdiction::CA,
        category: NewsCategory::Policy,
        url: "https://globalnews.ca/news/11241445/donald-trump-tariffs-canada-talks-leblanc-west-block/",
        impact: Impact::Medium,
    },
    Curated {
        id: "news_4",
        title: "EU Weighs 10% Tariff Deal as Trump's July Deadline Looms",
        summary: "Brussels negotiators hope to avoid higher tariffs on cars and medicines by agreeing to 10% US tariff on all EU exports. July 9 deadline approaches.",
        source: "Yahoo Finance",
        age_minutes: 7 * HOUR,
        country: Jurisdiction::US,
        category: NewsCategory::Tariff,
        url: "https://finance.yahoo.com/news/live/trump-tariffs-live-updates-eu-weighs-10-tariff-deal-as-trumps-july-deadline-looms-200619913.html",
        impact: Impact::High,
    },
    Curated {
        id: "news_5",
        title: "Trump Formalizes Tariff Cuts for U.K. as Trade Talks Continue",
        summary: "President Trump signs agreement lowering some tariffs on UK imports as both countries work toward broader trade deal.",
        source: "NBC News",
        age_minutes: 48,
        country: Jurisdiction::US,
        category: NewsCategory::Trade,
        url: "https://www.nbcnews.com/business/business-news/trump-formalizes-tariff-cuts-uk-trade-talks-continue-rcna213370",
        impact: Impact::Medium,
    },
    Curated {
        id: "news_6",
        title: "Canada Emerges as Safest Port in Trade War Storm",
        summary: "Average effective tariff on US imports from Canada reaches 2.3% - up from zero in January but lowest among major trading partners.",
        source: "CBC News",
        age_minutes: 3 * DAY,
        country: Jurisdiction::CA,
        category: NewsCategory::Policy,
        url: "https://www.cbc.ca/news/business/armstrong-economy-trade-war-tariffs-1.7560606",
        impact: Impact::Medium,
    },
    Curated {
        id: "news_7",
        title: "Tariff \"Stacking\" Adds Headache for US Importers",
        summary: "New complications arise for American importers as multiple tariff policies create overlapping duties on goods.",
        source: "Reuters",
        age_minutes: 5 * HOUR,
        country: Jurisdiction::US,
        category: NewsCategory::Policy,
        url: "https://www.reuters.com/business/tariff-stacking-adds-another-headache-us-importers-2025-06-16/",
        impact: Impact::Medium,
    },
    Curated {
        id: "news_8",
        title: "US-China Trade Tariffs to Remain at 10%, Lutnick Says",
        summary: "Commerce Secretary confirms China tariffs will stay at current 10% level following temporary agreement between both sides.",
        source: "CNBC",
        age_minutes: 5 * DAY,
        country: Jurisdiction::US,
        category: NewsCategory::Tariff,
        url: "https://www.cnbc.com/2025/06/11/us-china-trade-tariffs-lutnick.html",
        impact: Impact::Low,
    },
];

/// The curated set, timestamped relative to `now`.
pub fn articles(now: DateTime<Utc>) -> Vec<NewsArticle> {
    CURATED
        .iter()
        .map(|c| NewsArticle {
            id: c.id.to_string(),
            title: c.title.to_string(),
            summary: c.summary.to_string(),
            source: c.source.to_string(),
            published_at: now - Duration::minutes(c.age_minutes),
            url: Some(c.url.to_string()),
            country: c.country,
            category: c.category,
            impact: c.impact,
        })
        .collect()
}

pub fn is_fallback_id(id: &str) -> bool {
    CURATED.iter().any(|c| c.id == id)
}
