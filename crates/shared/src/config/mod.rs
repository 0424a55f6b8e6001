mod myconfig;

pub use self::myconfig::{Config, EmailConfig, NotificationConfig};
