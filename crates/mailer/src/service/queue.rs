use crate::{
    abstract_trait::{DeliveryQueueTrait, DynNotifier},
    domain::notification::Notification,
};
use shared::errors::ServiceError;
use std::sync::Arc;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct DeliveryJob {
    pub id: Uuid,
    pub notification: Notification,
}

/// Sending half of the in-process delivery queue.
#[derive(Clone)]
pub struct DeliveryQueue {
    sender: mpsc::UnboundedSender<DeliveryJob>,
}

/// Worker tasks draining the queue. They stop once every `DeliveryQueue`
/// handle has been dropped and the backlog is empty.
pub struct DeliveryWorkers {
    handles: Vec<JoinHandle<()>>,
}

impl DeliveryQueue {
    pub fn start(notifier: DynNotifier, workers: usize) -> (Self, DeliveryWorkers) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let handles = (0..workers.max(1))
            .map(|worker_id| {
                tokio::spawn(run_worker(worker_id, receiver.clone(), notifier.clone()))
            })
            .collect();

        (Self { sender }, DeliveryWorkers { handles })
    }
}

impl DeliveryQueueTrait for DeliveryQueue {
    fn submit(&self, notification: Notification) -> Result<Uuid, ServiceError> {
        let id = Uuid::new_v4();

        self.sender
            .send(DeliveryJob { id, notification })
            .map_err(|_| {
                error!("❌ Delivery queue is closed, job {id} dropped");
                ServiceError::Queue("delivery workers are not running".to_string())
            })?;

        info!("📬 Delivery job {id} queued");
        Ok(id)
    }
}

impl DeliveryWorkers {
    pub async fn shutdown(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Delivery worker terminated abnormally: {e}");
            }
        }
        info!("✅ Delivery workers stopped");
    }
}

async fn run_worker(
    worker_id: usize,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<DeliveryJob>>>,
    notifier: DynNotifier,
) {
    info!("🚀 Delivery worker {worker_id} started");

    loop {
        let job = receiver.lock().await.recv().await;

        let Some(job) = job else {
            break;
        };

        if notifier.notify(&job.notification).await {
            info!("✅ Job {} delivered by worker {worker_id}", job.id);
        } else {
            warn!("⚠️ Job {} failed, not retried", job.id);
        }
    }

    info!("Delivery worker {worker_id} exiting");
}
