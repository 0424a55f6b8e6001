mod email;
mod queue;
mod submission;

pub use self::email::EmailService;
pub use self::queue::{DeliveryJob, DeliveryQueue, DeliveryWorkers};
pub use self::submission::SubmissionService;
