use crate::{
    abstract_trait::{DynDeliveryQueue, DynSubmissionService},
    service::SubmissionService,
};
use prometheus_client::registry::Registry;
use shared::{config::NotificationConfig, utils::Metrics};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub submission: DynSubmissionService,
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(config: &NotificationConfig, queue: DynDeliveryQueue, metrics: Metrics) -> Self {
        let mut registry = Registry::default();
        metrics.register(&mut registry);

        let submission =
            Arc::new(SubmissionService::new(queue, config.clone(), metrics)) as DynSubmissionService;

        Self {
            submission,
            registry: Arc::new(registry),
        }
    }
}
