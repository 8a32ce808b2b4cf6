mod error;
mod eticket_service;
mod eticket_service_impl;
mod qr_code;

pub use error::*;
pub use eticket_service::*;
pub use eticket_service_impl::*;
