use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use meditrack_core::DomainError;
use meditrack_inventory::RecordKind;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound(what) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
        }
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Portal endpoints answer with `{success: false, message}` instead.
pub fn portal_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_kind(s: &str) -> Result<RecordKind, axum::response::Response> {
    s.parse::<RecordKind>().map_err(|e| {
        json_error(
            StatusCode::NOT_FOUND,
            "unknown_kind",
            format!("{e}; expected one of: medicine, equipment, surgery_supply"),
        )
    })
}
