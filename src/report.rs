//! Plain-text dashboard report: prices, tariffs, recent headlines.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::news::types::{Impact, NewsArticle};
use crate::pricing::types::{ResolvedQuote, Trend};
use crate::tariffs::{self, TariffRecord};

pub const REPORT_TITLE: &str = "CommodityTracker Pro Report";
const RECENT_NEWS: usize = 5;

/// `$x.xxxx` for per-pound units, `¥x.xx` for CNY units, `$x.xx` otherwise.
pub fn format_price(price: f64, unit: &str) -> String {
    if unit.contains("USD/lb") {
        format!("${price:.4}")
    } else if unit.contains("CNY") {
        format!("¥{price:.2}")
    } else {
        format!("${price:.2}")
    }
}

/// Always two decimals; non-negative values carry a `+`.
pub fn format_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{change:.2}%")
    } else {
        format!("{change:.2}%")
    }
}

fn trend_word(t: Trend) -> &'static str {
    match t {
        Trend::Up => "Upward",
        Trend::Down => "Downward",
    }
}

fn impact_word(i: Impact) -> &'static str {
    match i {
        Impact::High => "high",
        Impact::Medium => "medium",
        Impact::Low => "low",
    }
}

/// Render the full report. `generated_at` is passed in so output is reproducible.
pub fn render(
    quotes: &[ResolvedQuote],
    tariff_records: &[&TariffRecord],
    news: &[NewsArticle],
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, quotes, tariff_records, news, generated_at);
    out
}

fn write_report(
    out: &mut String,
    quotes: &[ResolvedQuote],
    tariff_records: &[&TariffRecord],
    news: &[NewsArticle],
    generated_at: DateTime<Utc>,
) -> std::fmt::Result {
    writeln!(out, "{REPORT_TITLE}")?;
    writeln!(out, "Generated on: {}", generated_at.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(out)?;

    writeln!(out, "Executive Summary")?;
    writeln!(
        out,
        "This report covers {} tracked commodities, {} tariff schedules, and {} recent trade news developments.",
        quotes.len(),
        tariff_records.len(),
        news.len()
    )?;
    writeln!(out)?;

    writeln!(out, "Commodity Prices Overview")?;
    for (i, q) in quotes.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, q.name)?;
        writeln!(out, "   Price: {} ({})", format_price(q.price, q.unit), q.unit)?;
        writeln!(
            out,
            "   Change: {} ({} trend)",
            format_change(q.change_percent),
            trend_word(q.trend)
        )?;
        writeln!(out, "   Exchange: {}", q.exchange)?;
    }
    writeln!(out)?;

    writeln!(out, "Tariff Schedule")?;
    for (i, t) in tariff_records.iter().enumerate() {
        writeln!(out, "{}. HS {} - {}", i + 1, t.hs_code, t.description)?;
        let rates: Vec<String> = t
            .rates
            .iter()
            .map(|r| format!("{} {}", r.jurisdiction.code(), tariffs::format_rate(r.rate)))
            .collect();
        writeln!(out, "   Rates: {}", rates.join(", "))?;
        writeln!(out, "   Notes: {}", t.notes)?;
    }
    writeln!(out)?;

    writeln!(out, "Trade News Headlines")?;
    let mut recent: Vec<&NewsArticle> = news.iter().collect();
    recent.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    for (i, n) in recent.iter().take(RECENT_NEWS).enumerate() {
        writeln!(out, "{}. {}", i + 1, n.title)?;
        writeln!(
            out,
            "   Source: {} | Country: {} | Impact: {}",
            n.source,
            n.country.name(),
            impact_word(n.impact)
        )?;
        writeln!(out, "   {}", n.summary)?;
    }
    writeln!(out)?;

    let up = quotes.iter().filter(|q| q.trend == Trend::Up).count();
    let high = news.iter().filter(|n| n.impact == Impact::High).count();
    writeln!(out, "Market Analysis")?;
    writeln!(
        out,
        "Of the {} tracked commodities, {} are showing upward trends while {} are declining. {} high-impact news items are currently influencing commodity markets.",
        quotes.len(),
        up,
        quotes.len() - up,
        high
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Generated by CommodityTracker Pro - Professional Intelligence for Canadian PVF Manufacturers"
    )
}
