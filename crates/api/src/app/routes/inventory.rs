use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;

use meditrack_core::{DomainError, RecordId};
use meditrack_inventory::{
    FieldUpdateRequest, FieldUpdateResult, build_record, search::filter_matches,
    validation::parse_date,
};

use crate::app::dto::{self, FormOrJson, RecordView};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/:kind", get(list_records).post(create_record))
        .route("/:kind/:id", get(get_record))
        .route("/:kind/:id/update", post(update_field))
}

fn parse_id(raw: &str) -> Result<RecordId, axum::response::Response> {
    raw.parse::<RecordId>()
        .map_err(errors::domain_error_to_response)
}

pub async fn list_records(
    Extension(services): Extension<Arc<AppServices>>,
    Path(kind): Path<String>,
    Query(q): Query<dto::ListQuery>,
) -> axum::response::Response {
    let kind = match errors::parse_kind(&kind) {
        Ok(k) => k,
        Err(res) => return res,
    };
    let today = services.today();
    let query = q.search.unwrap_or_default();
    let by = q.search_by.unwrap_or_default();

    let records: Vec<RecordView> = services
        .records
        .list(kind)
        .into_iter()
        .filter(|r| filter_matches(r, &query, by))
        .map(|r| RecordView::new(r, today))
        .collect();

    Json(records).into_response()
}

pub async fn get_record(
    Extension(services): Extension<Arc<AppServices>>,
    Path((kind, id)): Path<(String, String)>,
) -> axum::response::Response {
    let kind = match errors::parse_kind(&kind) {
        Ok(k) => k,
        Err(res) => return res,
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.records.get(kind, id) {
        Some(rec) => Json(RecordView::new(rec, services.today())).into_response(),
        None => errors::domain_error_to_response(DomainError::not_found(format!("{kind} {id}"))),
    }
}

pub async fn create_record(
    Extension(services): Extension<Arc<AppServices>>,
    Path(kind): Path<String>,
    FormOrJson(body): FormOrJson<dto::CreateRecordBody>,
) -> axum::response::Response {
    let kind = match errors::parse_kind(&kind) {
        Ok(k) => k,
        Err(res) => return res,
    };
    let today = services.today();
    let mut values = body.values;

    let id = match values.remove("id").filter(|v| !v.trim().is_empty()) {
        Some(raw) => match parse_id(&raw) {
            Ok(id) => Some(id),
            Err(res) => return res,
        },
        None => None,
    };
    let date_added: NaiveDate = match values.remove("date_added").filter(|v| !v.trim().is_empty())
    {
        Some(raw) => match parse_date(&raw) {
            Ok(d) => d,
            Err(e) => {
                return errors::domain_error_to_response(DomainError::validation(e.to_string()));
            }
        },
        None => today,
    };

    let build = |id: RecordId| {
        build_record(kind, id, date_added, &values, today)
            .map_err(|e| DomainError::validation(e.to_string()))
    };
    let created = match id {
        Some(id) => build(id).and_then(|record| {
            services.records.insert(record.clone())?;
            Ok(record)
        }),
        None => services.records.insert_with_next_id(kind, &build),
    };
    let record = match created {
        Ok(r) => r,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (StatusCode::CREATED, Json(RecordView::new(record, today))).into_response()
}

/// Logical outcomes (unknown record, bad field, bad value) are all `200`
/// with `success: false`; only transport problems get other statuses.
pub async fn update_field(
    Extension(services): Extension<Arc<AppServices>>,
    Path((kind, id)): Path<(String, String)>,
    FormOrJson(body): FormOrJson<dto::FieldUpdateBody>,
) -> axum::response::Response {
    let kind = match errors::parse_kind(&kind) {
        Ok(k) => k,
        Err(res) => return res,
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    let req = FieldUpdateRequest::new(kind, id, body.field, body.value);
    let result = FieldUpdateResult::from(services.records.update(&req));
    Json(dto::UpdateResponse::from(result)).into_response()
}
