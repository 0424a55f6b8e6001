use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    notification::Notification, requests::EmailRequest, responses::SendEmailResponse,
};
use shared::errors::{NotifyError, ServiceError};

pub type DynNotifier = Arc<dyn NotifierTrait>;
pub type DynDeliveryQueue = Arc<dyn DeliveryQueueTrait>;
pub type DynSubmissionService = Arc<dyn SubmissionServiceTrait>;

#[async_trait]
pub trait NotifierTrait: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;

    /// Sends and reduces the outcome to a flag. Failures never propagate
    /// past this point.
    async fn notify(&self, notification: &Notification) -> bool {
        match self.send(notification).await {
            Ok(()) => true,
            Err(e) => {
                warn!(kind = e.kind(), "Notification '{}' not delivered", notification.subject);
                false
            }
        }
    }
}

/// Fire-and-forget submission of delivery work. An `Ok` only means the job
/// was queued; it says nothing about whether the email will go out.
pub trait DeliveryQueueTrait: Send + Sync {
    fn submit(&self, notification: Notification) -> Result<Uuid, ServiceError>;
}

pub trait SubmissionServiceTrait: Send + Sync {
    fn schedule(&self, req: &EmailRequest) -> Result<SendEmailResponse, ServiceError>;
}
