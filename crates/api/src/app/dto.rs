use std::collections::BTreeMap;

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

use meditrack_auth::UserSummary;
use meditrack_inventory::{
    DerivedStatus, Field, FieldUpdateResult, InventoryRecord, status::derive_status,
};

use crate::app::errors;

// -------------------------
// Extractors
// -------------------------

/// Body accepted as `application/json` or as a urlencoded form.
pub struct FormOrJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<T>::from_request(req, state).await.map_err(|e| {
                errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text())
            })?;
            Ok(Self(body))
        } else {
            let Form(body) = Form::<T>::from_request(req, state).await.map_err(|e| {
                errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text())
            })?;
            Ok(Self(body))
        }
    }
}

/// Strings pass through; JSON numbers and booleans become their text form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(de).map(Scalar::into_text)
}

fn scalar_map<'de, D>(de: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Scalar>::deserialize(de)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into_text())).collect())
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct FieldUpdateBody {
    pub field: String,
    #[serde(deserialize_with = "scalar_text")]
    pub value: String,
}

/// Field name to raw value, plus optional `id` and `date_added`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CreateRecordBody {
    #[serde(deserialize_with = "scalar_map")]
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub search_by: Option<meditrack_inventory::SearchBy>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub report_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// -------------------------
// Response DTOs
// -------------------------

/// Wire shape of a field update outcome.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
}

impl From<FieldUpdateResult> for UpdateResponse {
    fn from(r: FieldUpdateResult) -> Self {
        Self {
            success: r.success,
            error: r.error_message,
            formatted_value: r.formatted_value,
        }
    }
}

/// A record with its display strings and derived highlights.
#[derive(Debug, Serialize)]
pub struct RecordView {
    #[serde(flatten)]
    pub record: InventoryRecord,
    pub display: BTreeMap<Field, String>,
    pub status: DerivedStatus,
}

impl RecordView {
    pub fn new(record: InventoryRecord, today: NaiveDate) -> Self {
        let display = record
            .kind()
            .fields()
            .iter()
            .filter_map(|f| record.display(*f).map(|d| (*f, d)))
            .collect();
        let status = derive_status(&record, today);
        Self {
            record,
            display,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse<T: Serialize> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_body_accepts_numeric_json_values() {
        let body: FieldUpdateBody =
            serde_json::from_value(serde_json::json!({"field": "cost", "value": 12.5})).unwrap();
        assert_eq!(body.value, "12.5");
        let body: FieldUpdateBody =
            serde_json::from_value(serde_json::json!({"field": "name", "value": "Dolo"})).unwrap();
        assert_eq!(body.value, "Dolo");
    }

    #[test]
    fn update_response_omits_absent_parts() {
        let ok = UpdateResponse::from(FieldUpdateResult::ok("₹12.00"));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"success": true, "formatted_value": "₹12.00"})
        );
        let failed = UpdateResponse::from(FieldUpdateResult::failed("Invalid field: color"));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"success": false, "error": "Invalid field: color"})
        );
    }
}
