use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::{
    model::{
        income::PayrollField,
        labels::FIELD_LABELS,
        other_income::{OTHER_INCOME, OtherIncomeEntry},
    },
    models::{
        BreakdownQuery, DashboardResponse, FieldInfo, OtherIncomeResponse, RefreshResponse,
        StatsResponse, TableQuery,
    },
    state::{DashboardState, RefreshError},
    stats::breakdown::compute_breakdown,
    view::table::build_table,
};

/// Whole dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Current dashboard snapshot", body = DashboardResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(name = "get_dashboard", skip(state))]
pub async fn get_dashboard(state: web::Data<DashboardState>) -> impl Responder {
    let snapshot = state.snapshot();
    debug!(records = snapshot.records.len(), "Serving dashboard");
    HttpResponse::Ok().json(DashboardResponse::new(
        &snapshot,
        state.is_loading(),
        &OTHER_INCOME,
    ))
}

/// Raw records, newest first
#[utoipa::path(
    get,
    path = "/api/income/records",
    responses(
        (status = 200, description = "Income records as stored", body = [crate::model::income::IncomeRecord])
    ),
    tag = "Income"
)]
pub async fn list_records(state: web::Data<DashboardState>) -> impl Responder {
    HttpResponse::Ok().json(&state.snapshot().records)
}

/// Summary statistics
#[utoipa::path(
    get,
    path = "/api/income/summary",
    responses(
        (status = 200, description = "Statistics; empty when there are no records", body = StatsResponse)
    ),
    tag = "Income"
)]
pub async fn get_summary(state: web::Data<DashboardState>) -> impl Responder {
    let snapshot = state.snapshot();
    HttpResponse::Ok().json(StatsResponse {
        loading: state.is_loading(),
        status: snapshot.status,
        stats: snapshot.stats.clone(),
    })
}

/// Trend and breakdown charts
#[utoipa::path(
    get,
    path = "/api/income/charts",
    responses(
        (status = 200, description = "The three line charts", body = crate::view::DashboardCharts)
    ),
    tag = "Income"
)]
pub async fn get_charts(state: web::Data<DashboardState>) -> impl Responder {
    HttpResponse::Ok().json(&state.snapshot().charts)
}

/// Breakdown points before grouping
#[utoipa::path(
    get,
    path = "/api/income/breakdown",
    params(BreakdownQuery),
    responses(
        (status = 200, description = "Per-field points, oldest month first", body = [crate::stats::SeriesPoint]),
        (status = 400, description = "Unknown mode")
    ),
    tag = "Income"
)]
pub async fn get_breakdown(
    state: web::Data<DashboardState>,
    query: web::Query<BreakdownQuery>,
) -> impl Responder {
    let snapshot = state.snapshot();
    let points = compute_breakdown(&snapshot.records, &FIELD_LABELS, query.mode);
    HttpResponse::Ok().json(points)
}

/// Formatted record table
#[utoipa::path(
    get,
    path = "/api/income/table",
    params(TableQuery),
    responses(
        (status = 200, description = "Display-ready table", body = crate::view::table::IncomeTable)
    ),
    tag = "Income"
)]
pub async fn get_table(
    state: web::Data<DashboardState>,
    query: web::Query<TableQuery>,
) -> impl Responder {
    let excluded = query.excluded();
    if excluded.is_empty() {
        return HttpResponse::Ok().json(&state.snapshot().table);
    }
    let snapshot = state.snapshot();
    HttpResponse::Ok().json(build_table(&snapshot.records, &FIELD_LABELS, &excluded))
}

/// Year-end bonus and tax refund list
#[utoipa::path(
    get,
    path = "/api/income/other",
    responses(
        (status = 200, description = "Adjustments kept outside the record store", body = OtherIncomeResponse)
    ),
    tag = "Income"
)]
pub async fn get_other_income() -> impl Responder {
    HttpResponse::Ok().json(OtherIncomeResponse {
        entries: OTHER_INCOME.clone(),
        lines: OTHER_INCOME.iter().map(OtherIncomeEntry::display_line).collect(),
    })
}

/// Payroll column schema
#[utoipa::path(
    get,
    path = "/api/income/fields",
    responses(
        (status = 200, description = "Payroll columns with labels and usual sign", body = [FieldInfo])
    ),
    tag = "Income"
)]
pub async fn list_fields() -> impl Responder {
    let fields: Vec<FieldInfo> = PayrollField::iter()
        .map(|f| FieldInfo {
            name: f.name().to_string(),
            label: FIELD_LABELS.label(f.name()).to_string(),
            sign: f.sign(),
        })
        .collect();
    HttpResponse::Ok().json(fields)
}

/// Reload from the record store
#[utoipa::path(
    post,
    path = "/api/income/refresh",
    responses(
        (status = 200, description = "Records reloaded", body = RefreshResponse),
        (status = 409, description = "A load is already running"),
        (status = 429, description = "Too many refresh requests"),
        (status = 502, description = "Record store failed")
    ),
    tag = "Income"
)]
#[instrument(name = "refresh_income", skip(state))]
pub async fn refresh(state: web::Data<DashboardState>) -> actix_web::Result<impl Responder> {
    info!("Refresh requested");

    match state.refresh().await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(RefreshResponse {
            status: snapshot.status,
            count: snapshot.records.len(),
        })),
        Err(RefreshError::InProgress) => Ok(HttpResponse::Conflict().json(json!({
            "message": "Income records are already loading"
        }))),
        Err(RefreshError::Store(e)) => Err(e.into()),
    }
}
