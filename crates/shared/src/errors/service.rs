use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Delivery queue unavailable: {0}")]
    Queue(String),
}
