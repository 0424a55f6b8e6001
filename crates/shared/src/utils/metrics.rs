use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};

use crate::errors::NotifyError;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub status: Status,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum DeliveryOutcome {
    Sent,
    TemplateNotFound,
    Render,
    InvalidAddress,
    Message,
    AuthFailure,
    ConnectionFailure,
    Rejected,
}

impl DeliveryOutcome {
    pub fn from_result(result: &Result<(), NotifyError>) -> Self {
        match result {
            Ok(()) => DeliveryOutcome::Sent,
            Err(NotifyError::TemplateNotFound(_)) => DeliveryOutcome::TemplateNotFound,
            Err(NotifyError::Render(_)) => DeliveryOutcome::Render,
            Err(NotifyError::InvalidAddress(_)) => DeliveryOutcome::InvalidAddress,
            Err(NotifyError::Message(_)) => DeliveryOutcome::Message,
            Err(NotifyError::AuthFailure(_)) => DeliveryOutcome::AuthFailure,
            Err(NotifyError::ConnectionFailure(_)) => DeliveryOutcome::ConnectionFailure,
            Err(NotifyError::Rejected(_)) => DeliveryOutcome::Rejected,
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct DeliveryLabels {
    pub outcome: DeliveryOutcome,
}

fn duration_buckets() -> Histogram {
    Histogram::new(vec![
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ])
}

/// Request and delivery metrics. Every field is a cheap handle onto shared
/// atomics, so clones observe the same series.
#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
    pub delivery_counter: Family<DeliveryLabels, Counter>,
    pub delivery_duration: Family<DeliveryLabels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(duration_buckets),
            delivery_counter: Family::default(),
            delivery_duration: Family::new_with_constructor(duration_buckets),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "submission_request_counter",
            "Total number of form submissions received",
            self.request_counter.clone(),
        );
        registry.register(
            "submission_request_duration",
            "Histogram of form submission scheduling durations",
            self.request_duration.clone(),
        );
        registry.register(
            "email_delivery_counter",
            "Total number of notification deliveries by outcome",
            self.delivery_counter.clone(),
        );
        registry.register(
            "email_delivery_duration",
            "Histogram of notification delivery durations",
            self.delivery_duration.clone(),
        );
    }

    pub fn record(&self, status: Status, duration_secs: f64) {
        let labels = Labels { status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    pub fn record_delivery(&self, outcome: DeliveryOutcome, duration_secs: f64) {
        let labels = DeliveryLabels { outcome };
        self.delivery_counter.get_or_create(&labels).inc();
        self.delivery_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}
