use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::catalog::{self, Commodity, CommodityCategory};
use crate::dashboard::Dashboard;
use crate::report;
use crate::tariffs::{self, TariffRecord};

pub type AppState = Arc<Dashboard>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/commodities", get(list_commodities))
        .route("/api/prices", get(prices))
        .route("/api/tracked", get(tracked))
        .route("/api/tracked/reset", post(reset_tracked))
        .route("/api/tracked/{id}", post(track).delete(untrack))
        .route("/api/news", get(news))
        .route("/api/tariffs", get(list_tariffs))
        .route("/api/providers/status", get(provider_status))
        .route("/api/providers/test", get(provider_test))
        .route("/api/report", get(report_text))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize, Default)]
struct SearchQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

async fn list_commodities(Query(params): Query<SearchQuery>) -> Json<Vec<&'static Commodity>> {
    let mut items: Vec<&'static Commodity> = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => catalog::search(q),
        _ => catalog::COMMODITIES.iter().collect(),
    };
    if let Some(cat) = params.category.as_deref() {
        // Unknown category keys match nothing.
        let wanted = CommodityCategory::from_key(cat);
        items.retain(|c| Some(c.category) == wanted);
    }
    Json(items)
}

#[derive(Deserialize)]
struct PricesQuery {
    #[serde(default)]
    ids: Option<String>,
}

async fn prices(
    State(state): State<AppState>,
    Query(params): Query<PricesQuery>,
) -> impl IntoResponse {
    let quotes = match params.ids.as_deref() {
        Some(raw) => {
            let ids: Vec<&str> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            state.resolve_prices(ids.as_slice()).await
        }
        None => state.refresh_tracked().await,
    };
    Json(quotes)
}

#[derive(Serialize)]
struct TrackedResp {
    tracked: Vec<String>,
    max: usize,
}

async fn tracked(State(state): State<AppState>) -> Json<TrackedResp> {
    Json(TrackedResp {
        tracked: state.tracked(),
        max: state.config().max_tracked,
    })
}

fn tracked_result(state: &Dashboard, res: anyhow::Result<Vec<String>>) -> impl IntoResponse {
    match res {
        Ok(tracked) => (
            StatusCode::OK,
            Json(json!({ "tracked": tracked, "max": state.config().max_tracked })),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}

async fn track(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let res = state.track(&id);
    tracked_result(&state, res)
}

async fn untrack(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let res = state.untrack(&id);
    tracked_result(&state, res)
}

async fn reset_tracked(State(state): State<AppState>) -> impl IntoResponse {
    let res = Ok(state.reset_tracked());
    tracked_result(&state, res)
}

async fn news(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.resolve_news().await)
}

fn filter_tariffs(params: &SearchQuery) -> Vec<&'static TariffRecord> {
    let mut records: Vec<&'static TariffRecord> = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => tariffs::search(q),
        _ => tariffs::TARIFFS.iter().collect(),
    };
    if let Some(cat) = params.category.as_deref() {
        records.retain(|t| t.category == cat);
    }
    records
}

async fn list_tariffs(Query(params): Query<SearchQuery>) -> Json<Vec<&'static TariffRecord>> {
    Json(filter_tariffs(&params))
}

async fn provider_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.check_provider_configuration())
}

async fn provider_test(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.test_provider_connectivity().await)
}

async fn report_text(State(state): State<AppState>) -> impl IntoResponse {
    let (quotes, news) = tokio::join!(state.refresh_tracked(), state.resolve_news());
    let records = filter_tariffs(&SearchQuery::default());
    let body = report::render(&quotes, &records, &news, Utc::now());
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
}
