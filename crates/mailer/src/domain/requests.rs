use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct FormData {
    pub first_name: String,

    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[serde(default)]
    pub id_number: Option<String>,

    pub contact_number: String,

    #[serde(default)]
    pub quote_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct AgentInfo {
    pub agent: String,
    pub branch: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct EmailRequest {
    #[validate(nested)]
    #[serde(rename = "formData")]
    pub form_data: FormData,

    #[validate(nested)]
    #[serde(rename = "agentInfo")]
    pub agent_info: AgentInfo,

    pub pine_client_id: String,

    pub url: String,
}
