use axum::{
    Router,
    routing::{get, post},
};

pub mod insights;
pub mod inventory;
pub mod portal;
pub mod system;

/// Router for every endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        .nest("/inventory", inventory::router())
        .route("/alerts", get(insights::alerts))
        .route("/dashboard", get(insights::dashboard))
        .route("/reports", get(insights::report))
        .route("/search", get(insights::search))
        .route("/search/suggestions", get(insights::suggestions))
        .route("/api/login/:role", post(portal::login))
        .route("/api/academics", get(portal::academics))
        .route("/api/faculty", get(portal::faculty))
        .route("/api/events", get(portal::events))
        .route("/api/register", post(portal::register))
}
