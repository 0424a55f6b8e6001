use crate::{
    abstract_trait::{DynDeliveryQueue, SubmissionServiceTrait},
    domain::{notification::Notification, requests::EmailRequest, responses::SendEmailResponse},
};
use chrono::Local;
use shared::{
    config::NotificationConfig,
    errors::ServiceError,
    utils::{Metrics, Status},
};
use std::time::Instant;
use tracing::{error, info};

pub const SCHEDULED_MESSAGE: &str = "Notification email(s) scheduled for delivery";

pub struct SubmissionService {
    queue: DynDeliveryQueue,
    config: NotificationConfig,
    metrics: Metrics,
}

impl SubmissionService {
    pub fn new(queue: DynDeliveryQueue, config: NotificationConfig, metrics: Metrics) -> Self {
        Self {
            queue,
            config,
            metrics,
        }
    }
}

impl SubmissionServiceTrait for SubmissionService {
    fn schedule(&self, req: &EmailRequest) -> Result<SendEmailResponse, ServiceError> {
        info!(
            "📝 Lead received from agent {} ({}) for client {}",
            req.agent_info.agent, req.agent_info.branch, req.pine_client_id
        );

        let start = Instant::now();
        let now = Local::now();
        let notification = Notification::from_submission(req, &self.config, &now);

        match self.queue.submit(notification) {
            Ok(job_id) => {
                self.metrics
                    .record(Status::Success, start.elapsed().as_secs_f64());
                info!("✅ Notification for client {} scheduled as job {job_id}", req.pine_client_id);

                Ok(SendEmailResponse {
                    success: true,
                    message: SCHEDULED_MESSAGE.to_string(),
                    timestamp: now.to_rfc3339(),
                })
            }
            Err(e) => {
                self.metrics
                    .record(Status::Error, start.elapsed().as_secs_f64());
                error!("❌ Failed to schedule notification: {e}");
                Err(e)
            }
        }
    }
}
