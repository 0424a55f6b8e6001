use askama::Template;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::errors::NotifyError;

pub const NOTIFICATION_TEMPLATE: &str = "notification.html";

/// Names accepted by `render_template`.
pub const TEMPLATES: &[&str] = &[NOTIFICATION_TEMPLATE];

pub fn is_known_template(name: &str) -> bool {
    TEMPLATES.contains(&name)
}

/// Key/value data handed to a template. Values are arbitrary JSON; the
/// template decides which keys it reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateContext(BTreeMap<String, Value>);

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Value rendered as plain text; missing keys and nulls become "".
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// True when the key holds something worth printing.
    pub fn has(&self, key: &str) -> bool {
        !self.text(key).trim().is_empty()
    }

    /// Adds `current_year` unless the caller already supplied one.
    pub fn with_current_year(mut self) -> Self {
        self.0
            .entry("current_year".to_string())
            .or_insert_with(|| Value::from(Local::now().year()));
        self
    }
}

#[derive(Template, Debug)]
#[template(path = "notification.html")]
pub struct NotificationTemplate<'a> {
    pub ctx: &'a TemplateContext,
}

/// Renders one of the templates compiled from `templates/`. HTML escaping
/// is applied to every interpolated value.
pub fn render_template(name: &str, context: &TemplateContext) -> Result<String, NotifyError> {
    info!("📧 Rendering email template: {name}");

    let ctx = context.clone().with_current_year();

    let rendered = match name {
        NOTIFICATION_TEMPLATE => NotificationTemplate { ctx: &ctx }.render(),
        other => {
            error!("❌ Email template not found: {other}");
            return Err(NotifyError::TemplateNotFound(other.to_string()));
        }
    };

    match rendered {
        Ok(result) => {
            info!("✅ Successfully rendered email template.");
            Ok(result)
        }
        Err(e) => {
            error!("❌ Failed to render email template: {}", e);
            Err(NotifyError::Render(e.to_string()))
        }
    }
}
