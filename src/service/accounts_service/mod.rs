mod accounts_service;
mod accounts_service_impl;

pub use accounts_service::*;
pub use accounts_service_impl::*;
