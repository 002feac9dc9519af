//! Read-only views across every record: alerts, dashboard, reports, search.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde_json::json;

use meditrack_inventory::{
    ReportFilter, RecordKind,
    alerts::{collect_alerts, dashboard as build_dashboard},
    report::build_report,
    search::{search as search_records, suggestions as suggest},
    validation::parse_date,
};

use crate::app::dto::{self, RecordView};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn alerts(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let records = services.records.all();
    Json(collect_alerts(&records, services.today()))
}

pub async fn dashboard(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let records = services.records.all();
    Json(build_dashboard(&records, services.today()))
}

fn query_date(raw: &Option<String>, name: &str) -> Result<Option<NaiveDate>, Response> {
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_date(s).map(Some).map_err(|_| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_date",
                format!("{name} must be YYYY-MM-DD"),
            )
        }),
    }
}

/// A start date alone reports up to `today`.
fn parse_report_filter(q: &dto::ReportQuery, today: NaiveDate) -> Result<ReportFilter, Response> {
    let start = query_date(&q.start_date, "start_date")?;
    let end = query_date(&q.end_date, "end_date")?;
    let added_between = match (start, end) {
        (None, None) => None,
        (s, e) => Some((s.unwrap_or(NaiveDate::MIN), e.unwrap_or(today))),
    };

    let kind = match q.report_type.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(t) => Some(t.parse::<RecordKind>().map_err(|e| {
            errors::json_error(StatusCode::BAD_REQUEST, "invalid_report_type", e.to_string())
        })?),
    };

    Ok(ReportFilter {
        added_between,
        kind,
    })
}

pub async fn report(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::ReportQuery>,
) -> axum::response::Response {
    let filter = match parse_report_filter(&q, services.today()) {
        Ok(f) => f,
        Err(res) => return res,
    };
    let records = services.records.all();
    Json(build_report(&records, &filter)).into_response()
}

pub async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::SearchQuery>,
) -> impl IntoResponse {
    let today = services.today();
    let records = services.records.all();
    let results: Vec<RecordView> = search_records(&records, &q.query)
        .into_iter()
        .map(|r| RecordView::new(r.clone(), today))
        .collect();
    Json(json!({
        "query": q.query,
        "results": results,
    }))
}

pub async fn suggestions(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::SearchQuery>,
) -> impl IntoResponse {
    let records = services.records.all();
    Json(suggest(&records, &q.query))
}
