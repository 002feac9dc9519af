use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use meditrack_auth::{AuthError, PortalRole, authenticate};
use meditrack_portal::{RegistrationError, RegistrationRequest};

use crate::app::dto::{self, FormOrJson};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Path(role): Path<String>,
    FormOrJson(body): FormOrJson<dto::LoginBody>,
) -> axum::response::Response {
    let Ok(role) = role.parse::<PortalRole>() else {
        return errors::portal_error(
            StatusCode::UNAUTHORIZED,
            AuthError::InvalidCredentials.to_string(),
        );
    };

    // Argon2 verification is CPU-bound.
    let accounts = services.accounts.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        authenticate(accounts.as_ref(), role, &body.email, &body.password)
    })
    .await;

    match outcome {
        Ok(Ok(user)) => Json(dto::LoginResponse {
            success: true,
            message: "Login successful!",
            user,
        })
        .into_response(),
        Ok(Err(AuthError::InvalidCredentials)) => {
            errors::portal_error(
                StatusCode::UNAUTHORIZED,
                AuthError::InvalidCredentials.to_string(),
            )
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "login failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "auth_error", "login failed")
        }
        Err(e) => {
            tracing::error!(error = %e, "login task failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "auth_error", "login failed")
        }
    }
}

pub async fn academics(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::KeywordQuery>,
) -> impl IntoResponse {
    Json(services.catalog.academics(q.q.as_deref()).into_iter().cloned().collect::<Vec<_>>())
}

pub async fn faculty(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::KeywordQuery>,
) -> impl IntoResponse {
    Json(services.catalog.faculty(q.q.as_deref()).into_iter().cloned().collect::<Vec<_>>())
}

pub async fn events(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.catalog.events.clone())
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    FormOrJson(body): FormOrJson<RegistrationRequest>,
) -> axum::response::Response {
    match services
        .registrations
        .register(&services.catalog.events, &body, Utc::now())
    {
        Ok(registration) => Json(dto::RegisterResponse {
            success: true,
            message: "Registration successful!",
            data: registration,
        })
        .into_response(),
        Err(e @ RegistrationError::AlreadyRegistered { .. }) => {
            errors::portal_error(StatusCode::CONFLICT, e.to_string())
        }
        Err(e) => errors::portal_error(StatusCode::BAD_REQUEST, e.to_string()),
    }
}
