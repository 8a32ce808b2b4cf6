mod error;
mod mailer_service;
mod smtp_mailer_service;

pub use error::*;
pub use mailer_service::*;
pub use smtp_mailer_service::*;
