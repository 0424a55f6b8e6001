mod error;
mod http;
mod notify;
mod service;

pub use self::error::ErrorResponse;
pub use self::http::HttpError;
pub use self::notify::NotifyError;
pub use self::service::ServiceError;
