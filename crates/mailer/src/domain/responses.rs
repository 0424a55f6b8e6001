use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Acknowledgement for an accepted submission. `success` reflects
/// scheduling only; delivery happens after this is returned.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}
