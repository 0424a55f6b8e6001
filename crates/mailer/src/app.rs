use crate::{
    abstract_trait::{DynDeliveryQueue, DynNotifier},
    handler::AppRouter,
    service::{DeliveryQueue, EmailService},
    state::AppState,
};
use anyhow::{Context, Result};
use shared::{config::Config, utils::Metrics};
use std::sync::Arc;
use tracing::info;

pub struct EmailServiceApp {
    config: Config,
}

impl EmailServiceApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        let metrics = Metrics::new();

        let notifier = Arc::new(
            EmailService::new(&self.config.email_config, metrics.clone())
                .context("failed to initialise email service")?,
        ) as DynNotifier;

        let (queue, workers) =
            DeliveryQueue::start(notifier, self.config.notification.delivery_workers);

        let state = AppState::new(
            &self.config.notification,
            Arc::new(queue) as DynDeliveryQueue,
            metrics,
        );

        info!(
            "🚀 Starting Email Service with {} delivery worker(s)...",
            self.config.notification.delivery_workers
        );

        // the router owns the only queue handle; once it is gone the workers
        // finish the backlog and exit
        AppRouter::serve(self.config.port, state).await?;

        info!("⏳ Draining pending deliveries...");
        workers.shutdown().await;

        Ok(())
    }
}
