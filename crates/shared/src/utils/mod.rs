mod gracefullshutdown;
mod logs;
mod metrics;
mod template;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{DeliveryOutcome, Metrics, Status};
pub use self::template::{
    NOTIFICATION_TEMPLATE, TEMPLATES, TemplateContext, is_known_template, render_template,
};
