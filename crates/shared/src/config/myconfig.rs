use anyhow::{Context, Result, anyhow};
use validator::ValidateEmail;

use crate::utils::{NOTIFICATION_TEMPLATE, TEMPLATES, is_known_template};

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub use_ssl: bool,
    pub from: String,
}

impl EmailConfig {
    pub fn from_source<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let smtp_server = lookup("SMTP_SERVER")
            .or_else(|| lookup("SMTP_HOST"))
            .filter(|v| !v.is_empty())
            .context("Missing environment variable: SMTP_SERVER")?;

        let smtp_user =
            lookup("SMTP_USERNAME").context("Missing environment variable: SMTP_USERNAME")?;

        let smtp_pass =
            lookup("SMTP_PASSWORD").context("Missing environment variable: SMTP_PASSWORD")?;

        let smtp_port = lookup("SMTP_PORT")
            .unwrap_or_else(|| "465".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid u16 integer")?;

        let use_ssl = lookup("USE_SSL")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let from = lookup("SMTP_FROM")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| smtp_user.clone());

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_user,
            smtp_pass,
            use_ssl,
            from,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub recipients: Vec<String>,
    pub default_template: String,
    pub delivery_workers: usize,
}

impl NotificationConfig {
    pub fn from_source<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let recipients: Vec<String> = lookup("NOTIFICATION_RECIPIENTS")
            .or_else(|| lookup("NOTIFICATION_EMAILS"))
            .context("Missing environment variable: NOTIFICATION_RECIPIENTS")?
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();

        if recipients.is_empty() {
            return Err(anyhow!(
                "NOTIFICATION_RECIPIENTS must contain at least one address"
            ));
        }

        if let Some(bad) = recipients.iter().find(|r| !r.validate_email()) {
            return Err(anyhow!(
                "NOTIFICATION_RECIPIENTS contains an invalid address: {bad}"
            ));
        }

        let default_template = lookup("DEFAULT_TEMPLATE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| NOTIFICATION_TEMPLATE.to_string());

        if !is_known_template(&default_template) {
            return Err(anyhow!(
                "DEFAULT_TEMPLATE '{default_template}' is not one of {TEMPLATES:?}"
            ));
        }

        let delivery_workers = lookup("DELIVERY_WORKERS")
            .unwrap_or_else(|| "4".to_string())
            .parse::<usize>()
            .context("DELIVERY_WORKERS must be a positive integer")?;

        if delivery_workers == 0 {
            return Err(anyhow!("DELIVERY_WORKERS must be at least 1"));
        }

        Ok(Self {
            recipients,
            default_template,
            delivery_workers,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub email_config: EmailConfig,
    pub notification: NotificationConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_source(&env_lookup)
    }

    pub fn from_source<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let email_config = EmailConfig::from_source(lookup).context("failed email config")?;
        let notification =
            NotificationConfig::from_source(lookup).context("failed notification config")?;

        Ok(Self {
            port,
            email_config,
            notification,
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SMTP_SERVER", "smtp.example.com"),
            ("SMTP_USERNAME", "mailer@example.com"),
            ("SMTP_PASSWORD", "secret"),
            ("NOTIFICATION_RECIPIENTS", "agent@example.com, admin@example.com"),
        ]
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config = Config::from_source(&source(&minimal())).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.email_config.smtp_port, 465);
        assert!(config.email_config.use_ssl);
        assert_eq!(config.email_config.from, "mailer@example.com");
        assert_eq!(config.notification.default_template, NOTIFICATION_TEMPLATE);
        assert_eq!(config.notification.delivery_workers, 4);
        assert_eq!(
            config.notification.recipients,
            vec!["agent@example.com", "admin@example.com"]
        );
    }

    #[test]
    fn smtp_host_is_accepted_as_alias() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "SMTP_SERVER");
        pairs.push(("SMTP_HOST", "relay.example.com"));

        let config = EmailConfig::from_source(&source(&pairs)).unwrap();
        assert_eq!(config.smtp_server, "relay.example.com");
    }

    #[test]
    fn missing_server_is_an_error() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "SMTP_SERVER");

        let err = EmailConfig::from_source(&source(&pairs)).unwrap_err();
        assert!(err.to_string().contains("SMTP_SERVER"));
    }

    #[test]
    fn use_ssl_flag_parsing() {
        for (raw, expected) in [
            ("True", true),
            ("1", true),
            ("t", true),
            ("false", false),
            ("0", false),
            ("no", false),
        ] {
            let mut pairs = minimal();
            pairs.push(("USE_SSL", raw));
            let config = EmailConfig::from_source(&source(&pairs)).unwrap();
            assert_eq!(config.use_ssl, expected, "USE_SSL={raw}");
        }
    }

    #[test]
    fn empty_recipient_list_is_rejected() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "NOTIFICATION_RECIPIENTS");
        pairs.push(("NOTIFICATION_RECIPIENTS", " , "));

        assert!(NotificationConfig::from_source(&source(&pairs)).is_err());
    }

    #[test]
    fn notification_emails_is_accepted_as_alias() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "NOTIFICATION_RECIPIENTS");
        pairs.push(("NOTIFICATION_EMAILS", "ops@example.com"));

        let config = NotificationConfig::from_source(&source(&pairs)).unwrap();
        assert_eq!(config.recipients, vec!["ops@example.com"]);
    }

    #[test]
    fn malformed_recipient_is_rejected() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "NOTIFICATION_RECIPIENTS");
        pairs.push(("NOTIFICATION_RECIPIENTS", "agent@example.com, not an address"));

        let err = NotificationConfig::from_source(&source(&pairs)).unwrap_err();
        assert!(err.to_string().contains("not an address"));
    }

    #[test]
    fn unknown_default_template_is_rejected() {
        let mut pairs = minimal();
        pairs.push(("DEFAULT_TEMPLATE", "welcome.html"));

        let err = NotificationConfig::from_source(&source(&pairs)).unwrap_err();
        assert!(err.to_string().contains("welcome.html"));
    }

    #[test]
    fn misconfigured_delivery_fails_startup() {
        let mut pairs = minimal();
        pairs.retain(|(k, _)| *k != "NOTIFICATION_RECIPIENTS");
        pairs.push(("NOTIFICATION_RECIPIENTS", "not an address"));
        pairs.push(("DEFAULT_TEMPLATE", "welcome.html"));

        assert!(Config::from_source(&source(&pairs)).is_err());
    }

    #[test]
    fn zero_workers_is_rejected() {
        let mut pairs = minimal();
        pairs.push(("DELIVERY_WORKERS", "0"));

        assert!(NotificationConfig::from_source(&source(&pairs)).is_err());
    }
}
