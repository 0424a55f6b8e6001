use crate::{
    abstract_trait::DynSubmissionService,
    domain::{
        requests::EmailRequest,
        responses::{HealthResponse, RootResponse, SendEmailResponse},
    },
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Local;
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = RootResponse)
    ),
    tag = "Email"
)]
pub async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(RootResponse {
            message: "Welcome to SureStrat Email API".to_string(),
            status: "active".to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Email"
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: Local::now().to_rfc3339(),
            version: API_VERSION.to_string(),
        }),
    )
}

#[utoipa::path(
    post,
    path = "/send-email",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Notification scheduled", body = SendEmailResponse),
        (status = 422, description = "Invalid submission"),
        (status = 500, description = "Scheduling failed", body = ErrorResponse)
    ),
    tag = "Email"
)]
pub async fn send_email_handler(
    Extension(service): Extension<DynSubmissionService>,
    SimpleValidatedJson(body): SimpleValidatedJson<EmailRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.schedule(&body)?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn email_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/send-email", post(send_email_handler))
        .layer(Extension(app_state.submission.clone()))
        .with_state(app_state)
}
