//! HTTP request handlers for API endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ApiError;
use super::state::AppState;
use crate::aggregate::{self, BreakdownRow, DailyRevenue, MonthlyRevenue, SalesSummary};
use crate::bootstrap::{self, InitReport};
use crate::catalog::{CategoryInfo, RegionInfo};
use crate::export::Exporter;
use crate::filter::FilterSpec;
use crate::record::SalesRecord;

/// Health check endpoint
///
/// Returns a simple status response to verify the server is running
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

/// Queries the store with the given filter and hands the records back.
///
/// Shared by every query/export handler so that "resolve filter, check
/// initialization, fetch" stays in one place.
async fn fetch_filtered(
    state: &AppState,
    filter: &FilterSpec,
) -> Result<Vec<SalesRecord>, ApiError> {
    let resolved = filter.resolve(Utc::now().date_naive())?;
    let store = state.store.lock().await;
    Ok(store.query_records(&resolved)?)
}

/// POST /query/records - Filtered raw records
pub async fn query_records(
    State(state): State<AppState>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<Vec<SalesRecord>>, ApiError> {
    let records = fetch_filtered(&state, &filter).await?;
    Ok(Json(records))
}

/// POST /query/summary - Ungrouped summary totals
pub async fn query_summary(
    State(state): State<AppState>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<SalesSummary>, ApiError> {
    let records = fetch_filtered(&state, &filter).await?;
    Ok(Json(aggregate::summarize(&records)))
}

/// POST /query/breakdown/:dimension - Revenue/count by category, region or segment
pub async fn query_breakdown(
    State(state): State<AppState>,
    Path(dimension): Path<String>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<Vec<BreakdownRow>>, ApiError> {
    let records = fetch_filtered(&state, &filter).await?;
    let rows = match dimension.as_str() {
        "category" => aggregate::breakdown_by_category(&records),
        "region" => aggregate::breakdown_by_region(&records),
        "segment" => aggregate::breakdown_by_segment(&records),
        other => {
            return Err(ApiError::InternalError(format!(
                "Unknown breakdown dimension: {}",
                other
            )))
        }
    };
    Ok(Json(rows))
}

/// POST /query/timeseries/daily - Revenue by day, chronological
pub async fn query_daily(
    State(state): State<AppState>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<Vec<DailyRevenue>>, ApiError> {
    let records = fetch_filtered(&state, &filter).await?;
    Ok(Json(aggregate::revenue_by_day(&records)))
}

/// POST /query/timeseries/monthly - Revenue by month, chronological
pub async fn query_monthly(
    State(state): State<AppState>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<Vec<MonthlyRevenue>>, ApiError> {
    let records = fetch_filtered(&state, &filter).await?;
    Ok(Json(aggregate::revenue_by_month(&records)))
}

/// Everything one dashboard render needs, computed from a single query.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub summary: SalesSummary,
    pub daily_revenue: Vec<DailyRevenue>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub by_category: Vec<BreakdownRow>,
    pub by_region: Vec<BreakdownRow>,
    pub by_segment: Vec<BreakdownRow>,
    pub top_products: Vec<BreakdownRow>,
}

/// POST /query/dashboard - Full render cycle in one round trip
pub async fn query_dashboard(
    State(state): State<AppState>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let records = fetch_filtered(&state, &filter).await?;
    Ok(Json(DashboardResponse {
        summary: aggregate::summarize(&records),
        daily_revenue: aggregate::revenue_by_day(&records),
        monthly_revenue: aggregate::revenue_by_month(&records),
        by_category: aggregate::breakdown_by_category(&records),
        by_region: aggregate::breakdown_by_region(&records),
        by_segment: aggregate::breakdown_by_segment(&records),
        top_products: aggregate::top_products(&records, 10),
    }))
}

/// GET /catalog/regions - Region reference rows
pub async fn catalog_regions(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegionInfo>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.region_catalog()?))
}

/// GET /catalog/categories - Category reference rows
pub async fn catalog_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryInfo>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.category_catalog()?))
}

/// Overrides for a re-initialization request. Unset fields fall back to the
/// server's configured generation settings.
#[derive(Debug, Default, Deserialize)]
pub struct InitRequest {
    #[serde(default)]
    pub record_count: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// POST /init - Truncate and regenerate the store
pub async fn run_init(
    State(state): State<AppState>,
    Json(request): Json<InitRequest>,
) -> Result<Json<InitReport>, ApiError> {
    let mut config = state.generator_config.clone();
    if let Some(record_count) = request.record_count {
        config.record_count = record_count;
    }
    if let Some(seed) = request.seed {
        config.seed = seed;
    }

    let mut store = state.store.lock().await;
    let report = bootstrap::initialize_store(&mut store, &config)?;
    Ok(Json(report))
}

/// Response for export endpoints
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub path: String,
}

/// POST /export/records - Write filtered records as CSV
pub async fn export_records(
    State(state): State<AppState>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<ExportResponse>, ApiError> {
    let records = fetch_filtered(&state, &filter).await?;
    let exporter = Exporter::new(&state.export_dir);
    let path = exporter.export_records(&records, Utc::now())?;
    Ok(Json(ExportResponse {
        path: path.display().to_string(),
    }))
}

/// POST /export/report - Write the multi-sheet summary report
pub async fn export_report(
    State(state): State<AppState>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<ExportResponse>, ApiError> {
    let records = fetch_filtered(&state, &filter).await?;
    let exporter = Exporter::new(&state.export_dir);
    let path = exporter.export_summary_report(&records, Utc::now())?;
    Ok(Json(ExportResponse {
        path: path.display().to_string(),
    }))
}
