mod recommendations_service;
mod recommendations_service_impl;

pub use recommendations_service::*;
pub use recommendations_service_impl::*;
