use crate::{abstract_trait::NotifierTrait, domain::notification::Notification};

use shared::{
    config::EmailConfig,
    errors::NotifyError,
    utils::{DeliveryOutcome, Metrics, render_template},
};

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use std::time::Instant;
use tracing::{error, info};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// SMTP reply codes that mean the credentials were not accepted.
const AUTH_FAILURE_CODES: [&str; 4] = ["530", "534", "535", "538"];

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    from: Mailbox,
    metrics: Metrics,
}

impl EmailService {
    pub fn new(config: &EmailConfig, metrics: Metrics) -> Result<Self, NotifyError> {
        let from: Mailbox = config.from.parse().map_err(|e| {
            error!("❌ Invalid sender email format: {}", e);
            NotifyError::InvalidAddress(format!("{}: {e}", config.from))
        })?;

        Ok(Self {
            config: config.clone(),
            from,
            metrics,
        })
    }

    /// A fresh transport per delivery. Without the pool feature every send
    /// opens its own session and closes it before returning.
    fn transport(&self) -> Result<SmtpTransport, NotifyError> {
        let creds = Credentials::new(self.config.smtp_user.clone(), self.config.smtp_pass.clone());

        let builder = if self.config.use_ssl {
            SmtpTransport::relay(&self.config.smtp_server)
        } else {
            SmtpTransport::starttls_relay(&self.config.smtp_server)
        }
        .map_err(|e| {
            error!("❌ Failed to create SMTP relay: {}", e);
            NotifyError::ConnectionFailure(e.to_string())
        })?;

        Ok(builder
            .credentials(creds)
            .port(self.config.smtp_port)
            .build())
    }

    pub fn build_message(
        &self,
        notification: &Notification,
        html: String,
    ) -> Result<Message, NotifyError> {
        if notification.recipients.is_empty() {
            return Err(NotifyError::InvalidAddress("no recipients".to_string()));
        }

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(&notification.subject);

        for recipient in &notification.recipients {
            let to: Mailbox = recipient.parse().map_err(|e| {
                error!("❌ Invalid recipient email: {}", e);
                NotifyError::InvalidAddress(format!("{recipient}: {e}"))
            })?;
            builder = builder.to(to);
        }

        builder
            .multipart(MultiPart::alternative().singlepart(SinglePart::html(html)))
            .map_err(|e| {
                error!("❌ Failed to build email: {}", e);
                NotifyError::Message(e.to_string())
            })
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let body = render_template(&notification.template, &notification.context)?;
        let email = self.build_message(notification, body)?;
        let mailer = self.transport()?;

        mailer
            .send(email)
            .await
            .map(|_| ())
            .map_err(classify_smtp_error)
    }
}

fn classify_smtp_error(err: SmtpError) -> NotifyError {
    match err.status() {
        // no reply from the server at all: refused, DNS, TLS or timeout
        None => NotifyError::ConnectionFailure(err.to_string()),
        Some(code) => {
            let code = code.to_string();
            if AUTH_FAILURE_CODES.contains(&code.as_str()) {
                NotifyError::AuthFailure(err.to_string())
            } else {
                NotifyError::Rejected(err.to_string())
            }
        }
    }
}

#[async_trait]
impl NotifierTrait for EmailService {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let recipients = notification.recipients.join(", ");
        info!("📨 Sending '{}' to {}", notification.subject, recipients);

        let start = Instant::now();
        let result = self.deliver(notification).await;

        self.metrics.record_delivery(
            DeliveryOutcome::from_result(&result),
            start.elapsed().as_secs_f64(),
        );

        match &result {
            Ok(()) => info!("✅ Email sent to {}", recipients),
            Err(e) => error!("❌ Failed to send email to {}: {}", recipients, e),
        }

        result
    }
}
