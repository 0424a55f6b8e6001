use chrono::{DateTime, TimeZone};
use serde_json::Value;
use shared::{config::NotificationConfig, utils::TemplateContext};
use std::fmt::Display;

use crate::domain::requests::EmailRequest;

pub const APP_NAME: &str = "SureStrat Pineapple Transfer Form";

/// A rendered-on-delivery email: who gets it, what it says, and which
/// template turns the context into HTML.
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipients: Vec<String>,
    pub subject: String,
    pub template: String,
    pub context: TemplateContext,
}

impl Notification {
    /// Builds the lead notification for a form submission. Recipients come
    /// from configuration; the submitter's own address is only template data.
    pub fn from_submission<Tz>(
        req: &EmailRequest,
        config: &NotificationConfig,
        submitted_at: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let form = &req.form_data;
        let agent = &req.agent_info;

        let mut subject = format!("New lead: {} {}", form.first_name, form.last_name);
        if let Some(quote_id) = form.quote_id.as_deref().filter(|q| !q.is_empty()) {
            subject.push_str(&format!(" (quote {quote_id})"));
        }

        let mut context = TemplateContext::new();
        context.insert(
            "customer_name",
            format!("{} {}", form.first_name, form.last_name),
        );
        context.insert("first_name", form.first_name.as_str());
        context.insert("last_name", form.last_name.as_str());
        context.insert("customer_email", form.email.as_str());
        context.insert("customer_id", optional(&form.id_number));
        context.insert("customer_phone", form.contact_number.as_str());
        context.insert("quote_id", optional(&form.quote_id));
        context.insert("agent_name", agent.agent.as_str());
        context.insert("branch", agent.branch.as_str());
        context.insert("pine_client_id", req.pine_client_id.as_str());
        context.insert("redirect_url", req.url.as_str());
        context.insert(
            "submission_date",
            submitted_at.format("%-d %B %Y, %H:%M").to_string(),
        );
        context.insert("app_name", APP_NAME);

        Self {
            recipients: config.recipients.clone(),
            subject,
            template: config.default_template.clone(),
            context,
        }
    }
}

fn optional(value: &Option<String>) -> Value {
    value
        .as_deref()
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}
