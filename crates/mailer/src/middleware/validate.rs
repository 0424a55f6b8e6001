use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::warn;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// JSON body extractor that also runs `validator` rules. Shape errors are
/// rejected here, before the handler (and anything it schedules) runs.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(json_value) =
            axum::Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    warn!("Rejected request body: {}", rejection.body_text());
                    let payload = json!({
                        "error": "Invalid JSON",
                        "message": rejection.body_text(),
                    });
                    (rejection.status(), axum::Json(payload))
                })?;

        json_value.validate().map_err(|validation_errors| {
            let details = collect_messages(&validation_errors);
            warn!("Validation failed: {details:?}");
            let payload = json!({
                "error": "Validation failed",
                "message": summarize(&details),
                "details": details,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload))
        })?;

        Ok(Self(json_value))
    }
}

/// Flattens nested errors into `path -> messages`, e.g.
/// `form_data.email -> ["Invalid email format"]`.
fn collect_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    walk(errors, None, &mut out);
    out
}

fn walk(errors: &ValidationErrors, prefix: Option<&str>, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = out.entry(path.clone()).or_default();
                messages.extend(field_errors.iter().map(|e| describe(&path, e)));
            }
            ValidationErrorsKind::Struct(inner) => walk(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    walk(inner, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "url" => "Invalid URL format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            _ => format!("Invalid {field}"),
        })
}

fn summarize(details: &BTreeMap<String, Vec<String>>) -> String {
    let messages: Vec<String> = details
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
        .collect();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::{AgentInfo, EmailRequest, FormData};
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_email_errors_are_reported_with_their_path() {
        let req = EmailRequest {
            form_data: FormData {
                first_name: "Thandi".into(),
                last_name: "Nkosi".into(),
                email: "thandi-at-example".into(),
                id_number: None,
                contact_number: "0821234567".into(),
                quote_id: None,
            },
            agent_info: AgentInfo {
                agent: "Pieter".into(),
                branch: "Cape Town".into(),
            },
            pine_client_id: "c0ffee".into(),
            url: "https://example.com".into(),
        };

        let details = collect_messages(&req.validate().unwrap_err());

        assert_eq!(details.len(), 1);
        let (path, messages) = details.iter().next().unwrap();
        assert!(path.ends_with(".email"), "{path}");
        assert_eq!(messages, &vec!["Invalid email format".to_string()]);
        assert!(summarize(&details).ends_with("email: Invalid email format"));
    }

    #[test]
    fn empty_details_fall_back_to_a_generic_message() {
        assert_eq!(summarize(&BTreeMap::new()), "Validation failed");
    }
}
